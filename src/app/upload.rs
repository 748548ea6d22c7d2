//! Image selection: file picker, drag-and-drop, preview

use super::App;
use crate::constants::IMAGE_EXTENSIONS;
use crate::session::ClientError;
use crate::types::UploadedImage;
use crate::ui::components::decode_color_image;
use eframe::egui;
use std::path::Path;
use tracing::{debug, warn};

impl App {
    /// Open the native file picker
    pub fn browse_for_image(&mut self, ctx: &egui::Context) {
        let picked = rfd::FileDialog::new()
            .set_title("Choose a room photo")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file();
        if let Some(path) = picked {
            self.load_image_file(ctx, &path);
        }
    }

    /// Track drag hover and take the first dropped file
    pub fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (!i.raw.hovered_files.is_empty(), i.raw.dropped_files.first().cloned())
        });
        if !self.session.accepts_drop() {
            self.drag_over = false;
            return;
        }
        self.drag_over = hovering;

        let Some(file) = dropped else {
            return;
        };
        debug!(name = %file.name, path = ?file.path, "File dropped");

        if let Some(bytes) = file.bytes {
            let name = if file.name.is_empty() {
                "dropped-image".to_string()
            } else {
                file.name.clone()
            };
            self.accept_upload(ctx, UploadedImage::from_bytes(name, bytes.to_vec()));
        } else if let Some(path) = file.path {
            self.load_image_file(ctx, &path);
        }
    }

    fn load_image_file(&mut self, ctx: &egui::Context, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        match std::fs::metadata(path) {
            Ok(meta) => {
                if self.session.check_upload_size(&name, meta.len()).is_err() {
                    return;
                }
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Failed to stat image file");
                self.session.show_error(ClientError::UnreadableFile.to_string());
                return;
            }
        }
        match std::fs::read(path) {
            Ok(bytes) => self.accept_upload(ctx, UploadedImage::from_bytes(name, bytes)),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Failed to read image file");
                self.session.show_error(ClientError::UnreadableFile.to_string());
            }
        }
    }

    fn accept_upload(&mut self, ctx: &egui::Context, file: UploadedImage) {
        if self.session.select_file(file).is_err() {
            return;
        }
        let Some(upload) = self.session.upload() else {
            return;
        };

        // Formats egui can't decode still upload; they just get no preview
        self.preview_texture = match decode_color_image(&upload.bytes) {
            Ok(image) => Some(ctx.load_texture("upload_preview", image, egui::TextureOptions::LINEAR)),
            Err(e) => {
                debug!(error = %e, "No preview for selected image");
                None
            }
        };
    }

    /// "Change image": back to the empty upload zone
    pub fn reset_upload(&mut self) {
        self.session.reset_upload();
        self.preview_texture = None;
        self.clear_result_images();
    }
}

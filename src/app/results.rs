//! Result images: fetching, textures, saving and opening the generated design

use super::{ApiEvent, App, RemoteImage};
use crate::api::ApiError;
use crate::types::*;
use crate::ui::components::decode_color_image;
use crate::utils::download_file_name;
use eframe::egui;
use std::path::Path;
use tracing::{debug, error, info, warn};

impl App {
    pub fn clear_result_images(&mut self) {
        self.result_images.clear();
    }

    /// Fetch both halves of the side-by-side view concurrently
    pub fn load_result_images(&mut self, ctx: &egui::Context, result: &DesignResult) {
        self.result_images.insert(ResultSlot::Original, RemoteImage::Loading);
        self.result_images.insert(ResultSlot::Generated, RemoteImage::Loading);

        let client = self.client.clone();
        let events = self.events.clone();
        let ctx = ctx.clone();
        let token = self.cancel_token.clone();
        let original = result.original_url.clone();
        let generated = result.generated_url.clone();

        self.runtime.spawn(async move {
            let fetch = |slot: ResultSlot, location: String| {
                let client = client.clone();
                async move {
                    let result = match client.fetch_image(&location).await {
                        Ok(bytes) => decode_color_image(&bytes)
                            .map(|img| (bytes, img))
                            .map_err(ApiError::from),
                        Err(e) => Err(e),
                    };
                    ApiEvent::ImageLoaded { slot, location, result }
                }
            };

            tokio::select! {
                _ = token.cancelled() => {}
                (a, b) = async {
                    futures::join!(
                        fetch(ResultSlot::Original, original),
                        fetch(ResultSlot::Generated, generated),
                    )
                } => {
                    Self::push_event(&events, &ctx, a);
                    Self::push_event(&events, &ctx, b);
                }
            }
        });
    }

    pub fn apply_loaded_image(
        &mut self,
        ctx: &egui::Context,
        slot: ResultSlot,
        location: &str,
        result: Result<(Vec<u8>, egui::ColorImage), ApiError>,
    ) {
        if !self.session.is_current_location(slot, location) {
            debug!(%location, "Discarding image for a result no longer shown");
            return;
        }

        let state = match result {
            Ok((bytes, image)) => {
                let texture = ctx.load_texture(
                    format!("result_{:?}", slot),
                    image,
                    egui::TextureOptions::LINEAR,
                );
                RemoteImage::Ready { texture, bytes }
            }
            Err(e) => {
                warn!(error = %e, %location, "Failed to load result image");
                RemoteImage::Failed
            }
        };
        self.result_images.insert(slot, state);
    }

    /// Save the generated image to a user-chosen file
    pub fn save_generated(&mut self, ctx: &egui::Context) {
        let Some(location) = self.session.download_target().map(str::to_string) else {
            return;
        };

        let dir = self.settings.download_path_or_default();
        let suggested = download_file_name(&location, chrono::Local::now());
        let Some(dest) = rfd::FileDialog::new()
            .set_title("Save design")
            .set_directory(&dir)
            .set_file_name(&suggested)
            .save_file()
        else {
            debug!("Save dialog cancelled");
            return;
        };

        if let Some(parent) = dest.parent() {
            self.settings.download_path = Some(parent.to_string_lossy().to_string());
        }

        let cached = match self.result_images.get(&ResultSlot::Generated) {
            Some(RemoteImage::Ready { bytes, .. }) => Some(bytes.clone()),
            _ => None,
        };

        info!(path = %dest.display(), "Saving generated design");
        self.save_in_progress = true;
        let client = self.client.clone();
        let events = self.events.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = async {
                let bytes = match cached {
                    Some(bytes) => bytes,
                    None => client.fetch_image(&location).await?,
                };
                tokio::fs::write(&dest, &bytes).await?;
                Ok::<_, ApiError>(dest)
            }
            .await;
            Self::push_event(&events, &ctx, ApiEvent::Saved(outcome));
        });
    }

    pub fn apply_saved(&mut self, outcome: Result<std::path::PathBuf, ApiError>) {
        self.save_in_progress = false;
        match outcome {
            Ok(path) => {
                info!(path = %path.display(), "Design saved");
                self.show_toast(saved_toast(&path));
            }
            Err(e) => {
                error!(error = %e, "Failed to save design");
                self.session.show_error(format!("Could not save the design: {}", e));
            }
        }
    }

    /// Open the generated image in the system browser
    pub fn open_generated(&mut self) {
        let Some(location) = self.session.download_target() else {
            return;
        };
        let url = self.client.resolve(location);
        if let Err(e) = open::that(&url) {
            warn!(error = %e, %url, "Failed to open browser");
            self.session.show_error(format!("Could not open {}", url));
        }
    }
}

fn saved_toast(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    format!("Saved {}", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_toast_names_the_file() {
        let path = Path::new("/home/me/Pictures/design-20260419-153012.png");
        assert_eq!(saved_toast(path), "Saved design-20260419-153012.png");
    }

    #[test]
    fn saved_toast_falls_back_to_the_full_path() {
        assert_eq!(saved_toast(Path::new("/")), "Saved /");
    }
}

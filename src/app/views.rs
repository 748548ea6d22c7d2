//! Panel rendering: the controls sidebar and the results area

use super::{App, RemoteImage};
use crate::constants::APP_NAME;
use crate::theme;
use crate::types::*;
use crate::ui::components::{fitted_image, image_placeholder, style_card, upload_zone};
use crate::utils::format_bytes;
use eframe::egui;
use egui_extras::{Size, StripBuilder};

impl App {
    // ========================================================================
    // SIDEBAR
    // ========================================================================

    pub fn render_sidebar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.add_space(theme::SPACING_XL);
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(egui_phosphor::regular::HOUSE_LINE)
                    .size(22.0)
                    .color(theme::ACCENT),
            );
            ui.label(
                egui::RichText::new(APP_NAME)
                    .size(theme::FONT_TITLE)
                    .strong()
                    .color(theme::TEXT_PRIMARY),
            );
        });
        self.render_backend_status(ui, ctx);
        ui.add_space(theme::SPACING_LG);

        egui::ScrollArea::vertical()
            .id_salt("sidebar_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                section_heading(ui, "1. YOUR ROOM");
                self.render_upload_section(ui, ctx);
                ui.add_space(theme::SPACING_LG);

                section_heading(ui, "2. STYLE");
                self.render_style_section(ui);
                ui.add_space(theme::SPACING_LG);

                section_heading(ui, "3. YOUR VISION");
                self.render_prompt_section(ui, ctx);
                ui.add_space(theme::SPACING_XL);
            });
    }

    fn render_backend_status(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let (color, text, detail) = match &self.backend_status {
            BackendStatus::Checking => (theme::STATUS_WARNING, "Checking server…".to_string(), None),
            BackendStatus::Online(status) => (
                theme::STATUS_SUCCESS,
                format!(
                    "Connected · {}",
                    status.status.as_deref().unwrap_or("online")
                ),
                status.details(),
            ),
            BackendStatus::Unreachable(err) => {
                (theme::STATUS_ERROR, "Server unreachable".to_string(), Some(err.clone()))
            }
        };

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("●").size(theme::FONT_SMALL).color(color));
            let label = ui.label(
                egui::RichText::new(text)
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_MUTED),
            );
            if let Some(detail) = detail {
                label.on_hover_text(detail);
            }
            let refresh = ui.add(
                egui::Button::new(
                    egui::RichText::new(egui_phosphor::regular::ARROW_CLOCKWISE)
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                )
                .frame(false),
            );
            if refresh.on_hover_text(self.client.base_url()).clicked() {
                self.recheck_backend_status(ctx);
            }
        });
    }

    fn render_upload_section(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if self.session.upload_zone_visible() {
            if upload_zone(ui, self.drag_over).clicked() {
                self.browse_for_image(ctx);
            }
            return;
        }

        let mut change_clicked = false;
        theme::section_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            match &self.preview_texture {
                Some(texture) => {
                    ui.vertical_centered(|ui| {
                        fitted_image(ui, texture, theme::PREVIEW_MAX_HEIGHT);
                    });
                }
                None => image_placeholder(
                    ui,
                    theme::PREVIEW_MAX_HEIGHT * 0.5,
                    egui_phosphor::regular::IMAGE,
                    "Preview unavailable",
                    false,
                ),
            }
            ui.add_space(theme::SPACING_SM);
            ui.horizontal(|ui| {
                if let Some(upload) = self.session.upload() {
                    ui.label(
                        egui::RichText::new(format!(
                            "{} · {}",
                            upload.file_name,
                            format_bytes(upload.bytes.len() as u64)
                        ))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_MUTED),
                    );
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let btn = theme::button(format!(
                        "{}  Change image",
                        egui_phosphor::regular::ARROWS_CLOCKWISE
                    ));
                    change_clicked = ui.add(btn).clicked();
                });
            });
        });

        if change_clicked {
            self.reset_upload();
        }
    }

    fn render_style_section(&mut self, ui: &mut egui::Ui) {
        let spacing = theme::SPACING_SM;
        let card_w = (ui.available_width() - spacing) / 2.0;
        let mut clicked = None;

        for row in DesignStyle::ALL.chunks(2) {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = spacing;
                for &style in row {
                    if style_card(ui, style.label(), self.session.style == style, card_w).clicked() {
                        clicked = Some(style);
                    }
                }
            });
        }
        if let Some(style) = clicked {
            self.session.select_style(style);
        }

        ui.add_space(theme::SPACING_SM);
        ui.label(
            egui::RichText::new(self.session.style_tip())
                .size(theme::FONT_SMALL)
                .italics()
                .color(theme::ACCENT_LIGHT),
        );
    }

    fn render_prompt_section(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new("Room type")
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_MUTED),
            );
            egui::ComboBox::from_id_salt("room_type")
                .selected_text(self.session.room_type.label())
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    for room in RoomType::ALL {
                        ui.selectable_value(&mut self.session.room_type, room, room.label());
                    }
                });
        });
        ui.add_space(theme::SPACING_SM);

        ui.add(
            egui::TextEdit::multiline(&mut self.session.prompt)
                .hint_text("e.g. a cozy reading corner with warm lighting and lots of plants")
                .desired_rows(5)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(theme::SPACING_SM);

        let enhance = ui.add_sized(
            [ui.available_width(), theme::BUTTON_HEIGHT_LARGE - 6.0],
            theme::button(format!("{}  Enhance prompt", egui_phosphor::regular::MAGIC_WAND)),
        );
        if enhance.clicked() {
            self.request_enhance(ctx);
        }

        ui.add_space(theme::SPACING_MD);
        let can_generate = self.session.can_generate();
        let label = format!("{}  Generate design", egui_phosphor::regular::SPARKLE);
        let button = if can_generate {
            theme::button_accent(label)
        } else {
            theme::button_disabled(label)
        };
        let generate = ui.add_enabled_ui(can_generate, |ui| {
            ui.add_sized([ui.available_width(), theme::BUTTON_HEIGHT_LARGE], button)
        });
        if generate.inner.clicked() {
            self.request_generate(ctx);
        }
    }

    // ========================================================================
    // RESULTS
    // ========================================================================

    pub fn render_results_panel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if let Some(message) = self.session.loading_message() {
            render_loading(ui, message);
            return;
        }

        if self.session.placeholder_visible() {
            render_placeholder(ui);
            return;
        }
        if !self.session.results_visible() {
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt("results_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let frame = theme::card_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    self.render_result_pair(ui);
                    ui.add_space(theme::SPACING_LG);
                    self.render_result_actions(ui, ctx);
                });
                if self.scroll_to_results {
                    self.scroll_to_results = false;
                    frame.response.scroll_to_me(Some(egui::Align::TOP));
                }
            });
    }

    fn render_result_pair(&self, ui: &mut egui::Ui) {
        let height = (ui.available_height() - 120.0).max(theme::RESULT_IMAGE_MIN_HEIGHT);
        StripBuilder::new(ui)
            .size(Size::exact(height))
            .vertical(|mut strip| {
                strip.strip(|builder| {
                    builder
                        .size(Size::relative(0.5))
                        .size(Size::remainder())
                        .horizontal(|mut strip| {
                            strip.cell(|ui| {
                                self.render_result_image(ui, ResultSlot::Original, "ORIGINAL", height)
                            });
                            strip.cell(|ui| {
                                self.render_result_image(ui, ResultSlot::Generated, "REDESIGNED", height)
                            });
                        });
                });
            });
    }

    fn render_result_image(&self, ui: &mut egui::Ui, slot: ResultSlot, title: &str, height: f32) {
        ui.vertical(|ui| {
            ui.label(
                egui::RichText::new(title)
                    .size(theme::FONT_SECTION)
                    .strong()
                    .color(theme::TEXT_DIM),
            );
            let image_height = height - 24.0;
            match self.result_images.get(&slot) {
                Some(RemoteImage::Ready { texture, .. }) => {
                    ui.vertical_centered(|ui| {
                        fitted_image(ui, texture, image_height);
                    });
                }
                Some(RemoteImage::Failed) => image_placeholder(
                    ui,
                    image_height,
                    egui_phosphor::regular::IMAGE_BROKEN,
                    "Image unavailable",
                    false,
                ),
                Some(RemoteImage::Loading) | None => {
                    image_placeholder(ui, image_height, "", "Loading image…", true)
                }
            }
        });
    }

    fn render_result_actions(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            let download_label = if self.save_in_progress {
                format!("{}  Saving…", egui_phosphor::regular::HOURGLASS)
            } else {
                format!("{}  Download", egui_phosphor::regular::DOWNLOAD_SIMPLE)
            };
            let download = ui.add_enabled(
                !self.save_in_progress,
                theme::button_accent(download_label),
            );
            if download.clicked() {
                self.save_generated(ctx);
            }

            let open = ui.add(theme::button(format!(
                "{}  Open in browser",
                egui_phosphor::regular::ARROW_SQUARE_OUT
            )));
            if open.clicked() {
                self.open_generated();
            }

            if let Some(target) = self.session.download_target() {
                ui.label(
                    egui::RichText::new(self.client.resolve(target))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
            }
        });
    }
}

fn section_heading(ui: &mut egui::Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(theme::FONT_SECTION)
            .strong()
            .color(theme::TEXT_DIM),
    );
    ui.add_space(theme::SPACING_SM);
}

fn render_loading(ui: &mut egui::Ui, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        ui.add(egui::Spinner::new().size(40.0).color(theme::ACCENT));
        ui.add_space(theme::SPACING_LG);
        ui.label(
            egui::RichText::new(message)
                .size(theme::FONT_HEADING)
                .color(theme::TEXT_SECONDARY),
        );
    });
}

fn render_placeholder(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        ui.label(
            egui::RichText::new(egui_phosphor::regular::PAINT_BRUSH_HOUSEHOLD)
                .size(48.0)
                .color(theme::TEXT_DIM),
        );
        ui.add_space(theme::SPACING_MD);
        ui.label(
            egui::RichText::new("Your redesigned room will appear here")
                .size(theme::FONT_HEADING)
                .color(theme::TEXT_MUTED),
        );
        ui.label(
            egui::RichText::new("Upload a photo, pick a style and describe your vision")
                .size(theme::FONT_LABEL)
                .color(theme::TEXT_DIM),
        );
    });
}

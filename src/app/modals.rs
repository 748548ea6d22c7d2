//! Blocking error dialog and toast notifications

use super::App;
use crate::theme;
use eframe::egui;

const TOAST_VISIBLE_SECS: f32 = 3.0;
const TOAST_FADE_SECS: f32 = 0.5;

impl App {
    /// Errors block the window until acknowledged
    pub fn render_error_modal(&mut self, ctx: &egui::Context) {
        let Some(message) = self.session.pending_error().map(str::to_string) else {
            return;
        };

        let modal = egui::Modal::new(egui::Id::new("error_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame());
        let response = modal.show(ctx, |ui| {
            ui.set_min_width(320.0);
            ui.set_max_width(420.0);
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(egui_phosphor::regular::WARNING_CIRCLE)
                        .size(22.0)
                        .color(theme::STATUS_ERROR),
                );
                ui.label(
                    egui::RichText::new("Something went wrong")
                        .size(theme::FONT_HEADING)
                        .strong(),
                );
            });
            ui.add_space(theme::SPACING_MD);
            ui.label(
                egui::RichText::new(&message)
                    .size(theme::FONT_BODY)
                    .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(theme::SPACING_XL);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add(theme::button_accent("OK")).clicked()
            })
            .inner
        });

        if response.inner || response.should_close() {
            self.session.dismiss_error();
        }
    }

    /// Toast in the bottom-right of the result panel, 3s visible then fade
    pub fn render_toast(&mut self, ctx: &egui::Context, panel_rect: egui::Rect) {
        let Some(msg) = self.toast_message.clone() else {
            return;
        };
        let elapsed = self
            .toast_start
            .map(|t| t.elapsed().as_secs_f32())
            .unwrap_or(0.0);
        if elapsed > TOAST_VISIBLE_SECS + TOAST_FADE_SECS {
            self.toast_message = None;
            self.toast_start = None;
            return;
        }
        let alpha = if elapsed > TOAST_VISIBLE_SECS {
            1.0 - (elapsed - TOAST_VISIBLE_SECS) / TOAST_FADE_SECS
        } else {
            1.0
        };

        let margin = theme::SPACING_XL;
        egui::Area::new(egui::Id::new("toast"))
            .fixed_pos(egui::pos2(panel_rect.right() - margin, panel_rect.bottom() - margin))
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                ui.set_opacity(alpha);
                theme::card_frame().show(ui, |ui| {
                    ui.set_max_width(360.0);
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(egui_phosphor::regular::CHECK_CIRCLE)
                                .color(theme::STATUS_SUCCESS),
                        );
                        ui.label(egui::RichText::new(msg).color(theme::TEXT_SECONDARY));
                    });
                });
            });

        ctx.request_repaint();
    }
}

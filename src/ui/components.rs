//! Reusable UI components
//!
//! Standalone widgets used by the sidebar and the results panel.

use crate::theme;
use eframe::egui;

/// Selectable style card. Returns the response so callers can react to clicks.
pub fn style_card(ui: &mut egui::Ui, label: &str, active: bool, width: f32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(width, theme::STYLE_CARD_HEIGHT),
        egui::Sense::click(),
    );

    if ui.is_rect_visible(rect) {
        let base = if active { theme::ACCENT_DIM } else { theme::BG_SURFACE };
        let (fill, draw_rect) = theme::button_visual(&response, base, rect);
        let painter = ui.painter();
        painter.rect_filled(draw_rect, theme::RADIUS_DEFAULT, fill);
        if active {
            painter.rect_stroke(
                draw_rect,
                theme::RADIUS_DEFAULT,
                egui::Stroke::new(theme::STROKE_MEDIUM, theme::ACCENT),
                egui::StrokeKind::Inside,
            );
        }
        painter.text(
            draw_rect.center(),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(theme::FONT_LABEL),
            if active { theme::TEXT_PRIMARY } else { theme::TEXT_MUTED },
        );
    }

    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response
}

/// Dashed-look drop target shown while no image is selected
pub fn upload_zone(ui: &mut egui::Ui, drag_over: bool) -> egui::Response {
    let width = ui.available_width();
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(width, theme::UPLOAD_ZONE_HEIGHT),
        egui::Sense::click(),
    );

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let (fill, stroke_color) = if drag_over {
            (theme::BG_DROP_HOVER, theme::ACCENT)
        } else if response.hovered() {
            (theme::lighten(theme::BG_INPUT, 0.04), theme::BORDER_DEFAULT)
        } else {
            (theme::BG_INPUT, theme::BORDER_SUBTLE)
        };
        painter.rect_filled(rect, theme::RADIUS_LARGE, fill);
        painter.rect_stroke(
            rect,
            theme::RADIUS_LARGE,
            egui::Stroke::new(theme::STROKE_MEDIUM, stroke_color),
            egui::StrokeKind::Inside,
        );
        painter.text(
            rect.center() - egui::vec2(0.0, 18.0),
            egui::Align2::CENTER_CENTER,
            egui_phosphor::regular::UPLOAD_SIMPLE,
            egui::FontId::proportional(30.0),
            if drag_over { theme::ACCENT } else { theme::TEXT_MUTED },
        );
        painter.text(
            rect.center() + egui::vec2(0.0, 16.0),
            egui::Align2::CENTER_CENTER,
            "Click to browse or drop a room photo",
            egui::FontId::proportional(theme::FONT_LABEL),
            theme::TEXT_SECONDARY,
        );
        painter.text(
            rect.center() + egui::vec2(0.0, 36.0),
            egui::Align2::CENTER_CENTER,
            "PNG, JPG or WEBP",
            egui::FontId::proportional(theme::FONT_SMALL),
            theme::TEXT_DIM,
        );
    }

    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response
}

/// Size that fits `image` inside `bounds` without changing its aspect ratio
pub fn fit_size(image: egui::Vec2, bounds: egui::Vec2) -> egui::Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (bounds.x / image.x).min(bounds.y / image.y);
    image * scale
}

/// Draw a texture scaled to fit the available width and `max_height`
pub fn fitted_image(ui: &mut egui::Ui, texture: &egui::TextureHandle, max_height: f32) -> egui::Response {
    let size = fit_size(
        texture.size_vec2(),
        egui::vec2(ui.available_width(), max_height),
    );
    ui.add(
        egui::Image::new(egui::load::SizedTexture::new(texture.id(), size))
            .corner_radius(theme::RADIUS_DEFAULT),
    )
}

/// Placeholder box with an icon and caption, used while an image loads or failed
pub fn image_placeholder(ui: &mut egui::Ui, height: f32, icon: &str, caption: &str, spinner: bool) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());
    ui.painter().rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_INPUT);
    if spinner {
        let spinner_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(24.0, 24.0));
        ui.put(spinner_rect, egui::Spinner::new().color(theme::ACCENT));
    } else {
        ui.painter().text(
            rect.center() - egui::vec2(0.0, 10.0),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(28.0),
            theme::TEXT_DIM,
        );
    }
    ui.painter().text(
        rect.center() + egui::vec2(0.0, 22.0),
        egui::Align2::CENTER_CENTER,
        caption,
        egui::FontId::proportional(theme::FONT_SMALL),
        theme::TEXT_MUTED,
    );
}

/// Convert decoded image bytes into an egui image
pub fn decode_color_image(bytes: &[u8]) -> Result<egui::ColorImage, image::ImageError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_size_preserves_aspect_ratio() {
        let fitted = fit_size(egui::vec2(1600.0, 900.0), egui::vec2(400.0, 400.0));
        assert_eq!(fitted, egui::vec2(400.0, 225.0));

        let tall = fit_size(egui::vec2(500.0, 1000.0), egui::vec2(400.0, 200.0));
        assert_eq!(tall, egui::vec2(100.0, 200.0));

        assert_eq!(fit_size(egui::Vec2::ZERO, egui::vec2(10.0, 10.0)), egui::Vec2::ZERO);
    }

    #[test]
    fn decodes_png_bytes() {
        let mut png = Vec::new();
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let decoded = decode_color_image(&png).unwrap();
        assert_eq!(decoded.size, [3, 2]);

        assert!(decode_color_image(b"not an image").is_err());
    }
}

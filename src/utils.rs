//! Utility functions

use crate::constants::APP_NAME;
use chrono::{DateTime, Local};
use std::path::PathBuf;

// Square viewBox, rasterized for the window and taskbar icon
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><rect x="2" y="2" width="60" height="60" rx="14" fill="#09090b"/><path d="M12 30 L32 13 L52 30 V51 H12 Z" fill="none" stroke="#2dd4bf" stroke-width="4" stroke-linejoin="round"/><rect x="20" y="36" width="24" height="9" rx="3" fill="#ffffff"/><rect x="18" y="33" width="5" height="12" rx="2" fill="#ffffff"/><rect x="41" y="33" width="5" height="12" rx="2" fill="#ffffff"/></svg>"##;

/// Rasterize the icon SVG to a square RGBA image (for window/taskbar icons).
pub fn rasterize_icon(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(ICON_SVG, &resvg::usvg::Options::default()).ok()?;
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default folder offered by the save dialog
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::picture_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Format bytes into human-readable string (B, KB, MB)
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Resolve a location returned by the backend against the server URL.
/// Absolute `http(s)://` locations pass through untouched.
pub fn resolve_url(base: &str, location: &str) -> String {
    if location.starts_with("http://") || location.starts_with("https://") {
        return location.to_string();
    }
    let base = base.trim_end_matches('/');
    if location.starts_with('/') {
        format!("{}{}", base, location)
    } else {
        format!("{}/{}", base, location)
    }
}

/// Suggested file name for saving a generated design, e.g.
/// `design-20260419-153012.png`. The extension follows the image location.
pub fn download_file_name(location: &str, now: DateTime<Local>) -> String {
    let path = location.split(['?', '#']).next().unwrap_or_default();
    let ext = path
        .rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.len() <= 4 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "png".to_string());
    format!("design-{}.{}", now.format("%Y%m%d-%H%M%S"), ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn relative_locations_join_the_server_url() {
        assert_eq!(
            resolve_url("http://localhost:8080/", "/outputs/a.png"),
            "http://localhost:8080/outputs/a.png"
        );
        assert_eq!(
            resolve_url("http://localhost:8080", "uploads/b.jpg"),
            "http://localhost:8080/uploads/b.jpg"
        );
        assert_eq!(
            resolve_url("http://localhost:8080", "https://cdn.example.com/c.png"),
            "https://cdn.example.com/c.png"
        );
    }

    #[test]
    fn download_name_uses_timestamp_and_extension() {
        let now = Local.with_ymd_and_hms(2026, 4, 19, 15, 30, 12).unwrap();
        assert_eq!(
            download_file_name("/outputs/generated_1.PNG", now),
            "design-20260419-153012.png"
        );
        assert_eq!(
            download_file_name("https://cdn.example.com/x.webp?sig=abc", now),
            "design-20260419-153012.webp"
        );
        assert_eq!(
            download_file_name("/outputs/no_extension", now),
            "design-20260419-153012.png"
        );
    }

    #[test]
    fn bytes_are_human_readable() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn icon_rasterizes_to_requested_size() {
        let (pixels, w, h) = rasterize_icon(32).unwrap();
        assert_eq!((w, h), (32, 32));
        assert_eq!(pixels.len(), 32 * 32 * 4);
    }
}

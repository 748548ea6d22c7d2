//! Common types and data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Interior design aesthetic used to bias generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DesignStyle {
    #[default]
    Modern,
    Scandinavian,
    Industrial,
    Bohemian,
    MidCentury,
    Luxury,
}

impl DesignStyle {
    pub const ALL: [DesignStyle; 6] = [
        DesignStyle::Modern,
        DesignStyle::Scandinavian,
        DesignStyle::Industrial,
        DesignStyle::Bohemian,
        DesignStyle::MidCentury,
        DesignStyle::Luxury,
    ];

    /// Identifier sent to the backend
    pub fn id(self) -> &'static str {
        match self {
            DesignStyle::Modern => "modern",
            DesignStyle::Scandinavian => "scandinavian",
            DesignStyle::Industrial => "industrial",
            DesignStyle::Bohemian => "bohemian",
            DesignStyle::MidCentury => "mid-century",
            DesignStyle::Luxury => "luxury",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DesignStyle::Modern => "Modern",
            DesignStyle::Scandinavian => "Scandinavian",
            DesignStyle::Industrial => "Industrial",
            DesignStyle::Bohemian => "Bohemian",
            DesignStyle::MidCentury => "Mid-Century",
            DesignStyle::Luxury => "Luxury",
        }
    }

    pub fn tip(self) -> &'static str {
        match self {
            DesignStyle::Modern => {
                "Tip: Focus on clean lines, neutral colors, and functional furniture."
            }
            DesignStyle::Scandinavian => "Tip: Use light wood, whites, and cozy textures.",
            DesignStyle::Industrial => {
                "Tip: Exposed brick, metal accents, and open spaces work best."
            }
            DesignStyle::Bohemian => "Tip: Vibrant colors, patterns, and plants.",
            DesignStyle::MidCentury => "Tip: Retro furniture, organic shapes, and wood accents.",
            DesignStyle::Luxury => {
                "Tip: Marble, velvet, gold accents, and sophisticated lighting."
            }
        }
    }
}

impl fmt::Display for DesignStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Room being redesigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    #[default]
    LivingRoom,
    Bedroom,
    Kitchen,
    Bathroom,
    DiningRoom,
    HomeOffice,
}

impl RoomType {
    pub const ALL: [RoomType; 6] = [
        RoomType::LivingRoom,
        RoomType::Bedroom,
        RoomType::Kitchen,
        RoomType::Bathroom,
        RoomType::DiningRoom,
        RoomType::HomeOffice,
    ];

    /// Value sent to the backend (it is interpolated into prompts as-is)
    pub fn id(self) -> &'static str {
        match self {
            RoomType::LivingRoom => "living room",
            RoomType::Bedroom => "bedroom",
            RoomType::Kitchen => "kitchen",
            RoomType::Bathroom => "bathroom",
            RoomType::DiningRoom => "dining room",
            RoomType::HomeOffice => "home office",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoomType::LivingRoom => "Living Room",
            RoomType::Bedroom => "Bedroom",
            RoomType::Kitchen => "Kitchen",
            RoomType::Bathroom => "Bathroom",
            RoomType::DiningRoom => "Dining Room",
            RoomType::HomeOffice => "Home Office",
        }
    }
}

/// Image picked by the user, held in memory until reset
#[derive(Clone, PartialEq)]
pub struct UploadedImage {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedImage")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl UploadedImage {
    /// Build from a file name and its contents. MIME comes from the extension,
    /// falling back to sniffing the bytes, then to `application/octet-stream`.
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name)
            .first()
            .map(|m| m.essence_str().to_string())
            .or_else(|| {
                image::guess_format(&bytes)
                    .ok()
                    .map(|f| f.to_mime_type().to_string())
            })
            .unwrap_or_else(|| "application/octet-stream".to_string());
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// Request parameters shared by both endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhanceRequest {
    pub prompt: String,
    pub style: DesignStyle,
    pub room_type: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub image: UploadedImage,
    pub prompt: String,
    pub style: DesignStyle,
    pub room_type: &'static str,
}

/// Response from `POST /api/test_prompt`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnhanceResponse {
    pub success: bool,
    pub enhanced: Option<String>,
    pub original: Option<String>,
    pub error: Option<String>,
}

/// Response from `POST /api/generate`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GenerateResponse {
    pub success: bool,
    pub original_image: Option<String>,
    pub generated_image: Option<String>,
    pub prompt: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

/// Response from `GET /api/status`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceStatus {
    pub status: Option<String>,
    pub models: Option<String>,
    pub rate_limit: Option<String>,
}

impl ServiceStatus {
    /// Hover text for the sidebar indicator, `None` when the backend sent nothing to add
    pub fn details(&self) -> Option<String> {
        let lines: Vec<String> = [("Models", &self.models), ("Rate limit", &self.rate_limit)]
            .into_iter()
            .filter_map(|(label, value)| value.as_ref().map(|v| format!("{}: {}", label, v)))
            .collect();
        (!lines.is_empty()).then(|| lines.join("\n"))
    }
}

/// Reachability of the backend as shown in the sidebar
#[derive(Debug, Clone, PartialEq)]
pub enum BackendStatus {
    Checking,
    Online(ServiceStatus),
    Unreachable(String),
}

/// A successful generation as displayed in the results panel
#[derive(Debug, Clone, PartialEq)]
pub struct DesignResult {
    pub original_url: String,
    pub generated_url: String,
    pub message: Option<String>,
}

/// Which half of the side-by-side view an image belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultSlot {
    Original,
    Generated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_ids_match_wire_format() {
        assert_eq!(DesignStyle::MidCentury.id(), "mid-century");
        assert_eq!(
            serde_json::to_string(&DesignStyle::MidCentury).unwrap(),
            "\"mid-century\""
        );
        assert_eq!(DesignStyle::default(), DesignStyle::Modern);
    }

    #[test]
    fn every_style_has_a_tip() {
        for style in DesignStyle::ALL {
            assert!(style.tip().starts_with("Tip: "), "{style} tip");
        }
    }

    #[test]
    fn mime_is_guessed_from_extension() {
        let img = UploadedImage::from_bytes("room.JPG", vec![1, 2, 3]);
        assert_eq!(img.mime, "image/jpeg");
        assert!(img.is_image());

        let txt = UploadedImage::from_bytes("notes.txt", b"hello".to_vec());
        assert_eq!(txt.mime, "text/plain");
        assert!(!txt.is_image());
    }

    #[test]
    fn mime_falls_back_to_content_sniffing() {
        let png_magic = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        let img = UploadedImage::from_bytes("no_extension", png_magic);
        assert_eq!(img.mime, "image/png");

        let unknown = UploadedImage::from_bytes("blob", vec![0, 1, 2, 3]);
        assert_eq!(unknown.mime, "application/octet-stream");
    }

    #[test]
    fn error_bodies_without_success_decode_as_failure() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"error": "No image provided"}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("No image provided"));
    }

    #[test]
    fn status_details_list_models_and_rate_limit() {
        let status: ServiceStatus = serde_json::from_str(
            r#"{"status": "online", "models": "gpt-4o, dall-e-3", "rate_limit": "10 per hour"}"#,
        )
        .unwrap();
        assert_eq!(
            status.details().as_deref(),
            Some("Models: gpt-4o, dall-e-3\nRate limit: 10 per hour")
        );
        assert_eq!(ServiceStatus::default().details(), None);
    }
}

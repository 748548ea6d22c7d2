//! Application constants and configuration

pub const APP_NAME: &str = "Room Redesign Studio";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
/// Overrides `server_url` from settings.json for the current session
pub const SERVER_URL_ENV: &str = "ROOM_STUDIO_SERVER";

pub const ENHANCE_PATH: &str = "/api/test_prompt";
pub const GENERATE_PATH: &str = "/api/generate";
pub const STATUS_PATH: &str = "/api/status";

/// Extensions offered by the file picker (matches what the backend accepts)
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

// =============================================================================
// User-facing messages
// =============================================================================
pub const MSG_ENHANCING: &str = "Enhancing your prompt...";
pub const MSG_GENERATING: &str = "Designing your space... (This takes ~30s)";

pub const MSG_ENHANCE_NETWORK: &str = "Network error during enhancement.";
pub const MSG_GENERATE_NETWORK: &str = "Network error during generation.";
pub const MSG_GENERATE_FAILED: &str = "Generation failed.";
pub const MSG_ENHANCE_FAILED_PREFIX: &str = "Enhancement failed";

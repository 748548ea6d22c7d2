//! User settings stored as settings.json in the app data directory

use crate::constants::{DEFAULT_SERVER_URL, SERVER_URL_ENV};
use crate::types::{DesignStyle, RoomType};
use crate::utils::default_download_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Backend
    pub server_url: String,
    pub request_timeout_secs: u64,
    pub max_upload_mb: u64,

    // Paths
    pub download_path: Option<String>,

    // Last used choices
    pub last_style: DesignStyle,
    pub last_room_type: RoomType,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout_secs: 300,
            max_upload_mb: 16,
            download_path: None,
            last_style: DesignStyle::default(),
            last_room_type: RoomType::default(),
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Server URL for this session; the environment variable wins over the file
    pub fn effective_server_url(&self) -> String {
        Self::server_url_from(self, std::env::var(SERVER_URL_ENV).ok())
    }

    fn server_url_from(&self, env_value: Option<String>) -> String {
        match env_value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            Some(url) => {
                info!(%url, "Using server URL from environment");
                url
            }
            None => self.server_url.clone(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn download_path_or_default(&self) -> PathBuf {
        self.download_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(default_download_dir)
    }
}

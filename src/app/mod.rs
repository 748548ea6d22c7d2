//! App module - contains the main application state and logic

mod modals;
mod requests;
mod results;
mod upload;
mod views;

use crate::api::{ApiError, StudioClient};
use crate::session::Session;
use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use eframe::egui;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Outcome of a background task, delivered to the UI thread through the inbox
pub enum ApiEvent {
    Status(Result<ServiceStatus, ApiError>),
    Enhanced(Result<EnhanceResponse, ApiError>),
    Generated(Result<GenerateResponse, ApiError>),
    ImageLoaded {
        slot: ResultSlot,
        location: String,
        result: Result<(Vec<u8>, egui::ColorImage), ApiError>,
    },
    Saved(Result<PathBuf, ApiError>),
}

/// A result image fetched from the backend
pub enum RemoteImage {
    Loading,
    Ready {
        texture: egui::TextureHandle,
        bytes: Vec<u8>,
    },
    Failed,
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) session: Session,
    pub(crate) client: StudioClient,
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) cancel_token: CancellationToken,
    pub(crate) events: Arc<Mutex<Vec<ApiEvent>>>,
    // Backend reachability
    pub(crate) backend_status: BackendStatus,
    pub(crate) status_check_started: bool,
    // Upload preview
    pub(crate) preview_texture: Option<egui::TextureHandle>,
    pub(crate) drag_over: bool,
    // Results
    pub(crate) result_images: HashMap<ResultSlot, RemoteImage>,
    pub(crate) scroll_to_results: bool,
    pub(crate) save_in_progress: bool,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    // Window
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Result<Self, ApiError> {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let server_url = settings.effective_server_url();
        let client = StudioClient::new(&server_url, settings.request_timeout())?;
        info!(server = %client.base_url(), "Backend client ready");

        let mut session = Session::new(settings.max_upload_mb);
        session.select_style(settings.last_style);
        session.room_type = settings.last_room_type;

        Ok(Self {
            session,
            client,
            settings,
            data_dir,
            runtime: tokio::runtime::Runtime::new()?,
            cancel_token: CancellationToken::new(),
            events: Arc::new(Mutex::new(Vec::new())),
            backend_status: BackendStatus::Checking,
            status_check_started: false,
            preview_texture: None,
            drag_over: false,
            result_images: HashMap::new(),
            scroll_to_results: false,
            save_in_progress: false,
            toast_message: None,
            toast_start: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
        })
    }

    pub fn save_settings(&mut self) {
        self.settings.window_x = self.window_pos.map(|p| p.x);
        self.settings.window_y = self.window_pos.map(|p| p.y);
        self.settings.window_w = self.window_size.map(|s| s.x);
        self.settings.window_h = self.window_size.map(|s| s.y);
        self.settings.last_style = self.session.style;
        self.settings.last_room_type = self.session.room_type;
        self.settings.save(&self.data_dir);
    }

    /// Queue an outcome for the UI thread and wake the event loop
    fn push_event(events: &Arc<Mutex<Vec<ApiEvent>>>, ctx: &egui::Context, event: ApiEvent) {
        if let Ok(mut queue) = events.lock() {
            queue.push(event);
        }
        ctx.request_repaint();
    }

    pub fn show_toast(&mut self, msg: impl Into<String>) {
        self.toast_message = Some(msg.into());
        self.toast_start = Some(std::time::Instant::now());
    }
}

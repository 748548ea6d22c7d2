//! Backend requests and the per-frame event inbox

use super::{ApiEvent, App};
use crate::types::*;
use eframe::egui;
use tracing::{debug, info, warn};

impl App {
    /// Run a backend call on the runtime and post its outcome to the inbox.
    /// Tasks still running at shutdown are dropped quietly.
    fn spawn_request<F>(&self, ctx: &egui::Context, task: F)
    where
        F: std::future::Future<Output = ApiEvent> + Send + 'static,
    {
        let events = self.events.clone();
        let ctx = ctx.clone();
        let token = self.cancel_token.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Request abandoned during shutdown");
                }
                event = task => {
                    Self::push_event(&events, &ctx, event);
                }
            }
        });
    }

    pub fn check_backend_status(&mut self, ctx: &egui::Context) {
        if self.status_check_started {
            return;
        }
        self.status_check_started = true;
        self.backend_status = BackendStatus::Checking;

        let client = self.client.clone();
        self.spawn_request(ctx, async move { ApiEvent::Status(client.status().await) });
    }

    pub fn request_enhance(&mut self, ctx: &egui::Context) {
        let Ok(request) = self.session.begin_enhance() else {
            return;
        };
        info!(style = %request.style, room = request.room_type, "Enhancing prompt");

        let client = self.client.clone();
        self.spawn_request(ctx, async move {
            ApiEvent::Enhanced(client.enhance_prompt(&request).await)
        });
    }

    pub fn request_generate(&mut self, ctx: &egui::Context) {
        let Ok(request) = self.session.begin_generate() else {
            return;
        };
        info!(
            file = %request.image.file_name,
            style = %request.style,
            room = request.room_type,
            "Generating design"
        );
        self.clear_result_images();

        let client = self.client.clone();
        self.spawn_request(ctx, async move {
            ApiEvent::Generated(client.generate_design(request).await)
        });
    }

    /// Drain finished background work and apply it on the UI thread
    pub fn poll_api_events(&mut self, ctx: &egui::Context) {
        let events: Vec<ApiEvent> = match self.events.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(_) => return,
        };

        for event in events {
            match event {
                ApiEvent::Status(Ok(status)) => {
                    info!(status = ?status.status, "Backend reachable");
                    self.backend_status = BackendStatus::Online(status);
                }
                ApiEvent::Status(Err(e)) => {
                    warn!(error = %e, server = %self.client.base_url(), "Backend status check failed");
                    self.backend_status = BackendStatus::Unreachable(e.to_string());
                }
                ApiEvent::Enhanced(outcome) => self.session.finish_enhance(outcome),
                ApiEvent::Generated(outcome) => {
                    if let Some(result) = self.session.finish_generate(outcome).cloned() {
                        self.scroll_to_results = true;
                        if let Some(msg) = &result.message {
                            self.show_toast(msg.clone());
                        }
                        self.load_result_images(ctx, &result);
                    }
                }
                ApiEvent::ImageLoaded { slot, location, result } => {
                    self.apply_loaded_image(ctx, slot, &location, result);
                }
                ApiEvent::Saved(outcome) => self.apply_saved(outcome),
            }
        }
    }

    /// Manual re-check from the sidebar
    pub fn recheck_backend_status(&mut self, ctx: &egui::Context) {
        self.status_check_started = false;
        self.check_backend_status(ctx);
    }
}

//! Studio session state
//!
//! Everything the window shows is derived from a [`Session`]: the selected
//! style and room, the prompt text, the retained upload, the loading state,
//! the last result and the error waiting to be acknowledged. The `App` only
//! renders this state and moves requests between it and the network.

use crate::api::ApiError;
use crate::constants::*;
use crate::types::*;
use tracing::{debug, error, info, warn};

/// Validation failures caught before anything is sent to the backend.
/// `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("Please enter a basic prompt first.")]
    MissingPrompt,
    #[error("Please describe your vision.")]
    MissingDescription,
    #[error("Please upload an image first.")]
    MissingImage,
    #[error("Please upload a valid image file.")]
    NotAnImage,
    #[error("This image is too large. The limit is {limit_mb} MB.")]
    FileTooLarge { limit_mb: u64 },
    #[error("Could not read the selected file.")]
    UnreadableFile,
}

pub struct Session {
    pub style: DesignStyle,
    pub room_type: RoomType,
    pub prompt: String,
    upload: Option<UploadedImage>,
    loading: Option<&'static str>,
    result: Option<DesignResult>,
    pending_error: Option<String>,
    max_upload_bytes: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(16)
    }
}

impl Session {
    pub fn new(max_upload_mb: u64) -> Self {
        Self {
            style: DesignStyle::default(),
            room_type: RoomType::default(),
            prompt: String::new(),
            upload: None,
            loading: None,
            result: None,
            pending_error: None,
            max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
        }
    }

    // ------------------------------------------------------------------
    // Upload
    // ------------------------------------------------------------------

    /// Validate and retain a picked or dropped file. A rejected file leaves
    /// the previously retained one untouched.
    pub fn select_file(&mut self, file: UploadedImage) -> Result<(), ClientError> {
        if !file.is_image() {
            debug!(file = %file.file_name, mime = %file.mime, "Rejected non-image upload");
            return Err(self.reject(ClientError::NotAnImage));
        }
        self.check_upload_size(&file.file_name, file.bytes.len() as u64)?;

        info!(file = %file.file_name, mime = %file.mime, size = file.bytes.len(), "Image selected");
        // Shown results belong to the file being replaced
        if self.upload.replace(file).is_some() {
            self.hide_results();
        }
        self.pending_error = None;
        Ok(())
    }

    /// Size check on its own, so a file on disk can be refused before it is read
    pub fn check_upload_size(&mut self, file_name: &str, size: u64) -> Result<(), ClientError> {
        if size > self.max_upload_bytes {
            let limit_mb = self.max_upload_bytes / (1024 * 1024);
            debug!(file = %file_name, size, "Rejected oversized upload");
            return Err(self.reject(ClientError::FileTooLarge { limit_mb }));
        }
        Ok(())
    }

    /// Clear the retained file, its preview and any shown results
    pub fn reset_upload(&mut self) {
        self.upload = None;
        self.hide_results();
    }

    pub fn upload(&self) -> Option<&UploadedImage> {
        self.upload.as_ref()
    }

    pub fn upload_zone_visible(&self) -> bool {
        self.upload.is_none()
    }

    /// Files are only taken by the visible upload zone, never over a dialog
    /// or while a request is running
    pub fn accepts_drop(&self) -> bool {
        self.upload_zone_visible() && self.loading.is_none() && self.pending_error.is_none()
    }

    // ------------------------------------------------------------------
    // Style
    // ------------------------------------------------------------------

    pub fn select_style(&mut self, style: DesignStyle) {
        self.style = style;
    }

    pub fn style_tip(&self) -> &'static str {
        self.style.tip()
    }

    // ------------------------------------------------------------------
    // Prompt enhancement
    // ------------------------------------------------------------------

    /// Validate the prompt and enter the loading state. On `Err` the error is
    /// already pending and no request must be made.
    pub fn begin_enhance(&mut self) -> Result<EnhanceRequest, ClientError> {
        let text = self.prompt.trim().to_string();
        if text.is_empty() {
            return Err(self.reject(ClientError::MissingPrompt));
        }
        let request = EnhanceRequest {
            prompt: text,
            style: self.style,
            room_type: self.room_type.id(),
        };
        self.set_loading(MSG_ENHANCING);
        Ok(request)
    }

    pub fn finish_enhance(&mut self, outcome: Result<EnhanceResponse, ApiError>) {
        match outcome {
            Ok(resp) if resp.success => match resp.enhanced {
                Some(enhanced) => {
                    debug!(len = enhanced.len(), "Prompt enhanced");
                    self.prompt = enhanced;
                }
                None => warn!("Enhancement succeeded without text, keeping prompt"),
            },
            Ok(resp) => {
                let msg = match resp.error {
                    Some(err) => format!("{}: {}", MSG_ENHANCE_FAILED_PREFIX, err),
                    None => format!("{}.", MSG_ENHANCE_FAILED_PREFIX),
                };
                self.show_error(msg);
            }
            Err(e) => {
                debug!(error = %e, "Enhancement request failed");
                self.show_error(MSG_ENHANCE_NETWORK);
            }
        }
        self.clear_loading();
    }

    // ------------------------------------------------------------------
    // Generation
    // ------------------------------------------------------------------

    /// Validate inputs, hide the previous result and enter the loading state.
    /// On `Err` the error is already pending and no request must be made.
    pub fn begin_generate(&mut self) -> Result<GenerateRequest, ClientError> {
        let Some(image) = self.upload.clone() else {
            return Err(self.reject(ClientError::MissingImage));
        };
        let prompt = self.prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(self.reject(ClientError::MissingDescription));
        }
        let request = GenerateRequest {
            image,
            prompt,
            style: self.style,
            room_type: self.room_type.id(),
        };
        self.set_loading(MSG_GENERATING);
        self.hide_results();
        Ok(request)
    }

    /// Apply the generation outcome. Returns the result now on display, if any.
    pub fn finish_generate(
        &mut self,
        outcome: Result<GenerateResponse, ApiError>,
    ) -> Option<&DesignResult> {
        match outcome {
            Ok(resp) if resp.success => match (resp.original_image, resp.generated_image) {
                (Some(original_url), Some(generated_url)) => {
                    info!(generated = %generated_url, "Design generated");
                    if let Some(prompt) = resp.prompt {
                        self.prompt = prompt;
                    }
                    self.show_results(DesignResult {
                        original_url,
                        generated_url,
                        message: resp.message,
                    });
                }
                _ => {
                    warn!("Generation reported success without image locations");
                    self.show_error(MSG_GENERATE_FAILED);
                }
            },
            Ok(resp) => {
                let msg = resp.error.unwrap_or_else(|| MSG_GENERATE_FAILED.to_string());
                self.show_error(msg);
            }
            Err(e) => {
                error!(error = %e, "Generation request failed");
                self.show_error(MSG_GENERATE_NETWORK);
            }
        }
        self.clear_loading();
        self.result.as_ref()
    }

    // ------------------------------------------------------------------
    // Results & loading
    // ------------------------------------------------------------------

    fn show_results(&mut self, result: DesignResult) {
        self.result = Some(result);
    }

    pub fn hide_results(&mut self) {
        self.result = None;
    }

    pub fn result(&self) -> Option<&DesignResult> {
        self.result.as_ref()
    }

    /// Whether `location` is still what `slot` of the shown result points at.
    /// Images fetched for a result that has since been replaced or cleared
    /// fail this check.
    pub fn is_current_location(&self, slot: ResultSlot, location: &str) -> bool {
        self.result.as_ref().is_some_and(|r| match slot {
            ResultSlot::Original => r.original_url == location,
            ResultSlot::Generated => r.generated_url == location,
        })
    }

    pub fn results_visible(&self) -> bool {
        self.result.is_some() && self.loading.is_none()
    }

    pub fn placeholder_visible(&self) -> bool {
        self.result.is_none() && self.loading.is_none()
    }

    /// Location the download action saves from
    pub fn download_target(&self) -> Option<&str> {
        self.result.as_ref().map(|r| r.generated_url.as_str())
    }

    fn set_loading(&mut self, message: &'static str) {
        self.loading = Some(message);
    }

    fn clear_loading(&mut self) {
        self.loading = None;
    }

    pub fn loading_message(&self) -> Option<&'static str> {
        self.loading
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Generation is disabled while any request holds the loading state
    pub fn can_generate(&self) -> bool {
        self.loading.is_none()
    }

    // ------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------

    pub fn show_error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!(message = %msg, "Surfacing error");
        self.pending_error = Some(msg);
    }

    fn reject(&mut self, err: ClientError) -> ClientError {
        self.show_error(err.to_string());
        err
    }

    pub fn pending_error(&self) -> Option<&str> {
        self.pending_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.pending_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str) -> UploadedImage {
        UploadedImage {
            file_name: name.to_string(),
            mime: "image/png".to_string(),
            bytes: vec![0u8; 64],
        }
    }

    fn text_file() -> UploadedImage {
        UploadedImage {
            file_name: "notes.txt".to_string(),
            mime: "text/plain".to_string(),
            bytes: b"not an image".to_vec(),
        }
    }

    fn network_error() -> ApiError {
        ApiError::Decode(serde_json::from_str::<EnhanceResponse>("<html>").unwrap_err())
    }

    fn ready_session() -> Session {
        let mut s = Session::default();
        s.select_file(png("room.png")).unwrap();
        s.prompt = "cozy reading nook".to_string();
        s
    }

    #[test]
    fn non_image_file_is_rejected_and_not_retained() {
        let mut s = Session::default();
        assert_eq!(s.select_file(text_file()), Err(ClientError::NotAnImage));
        assert!(s.upload().is_none());
        assert_eq!(s.pending_error(), Some("Please upload a valid image file."));
        assert!(s.upload_zone_visible());
    }

    #[test]
    fn rejected_file_keeps_previous_upload() {
        let mut s = Session::default();
        s.select_file(png("first.png")).unwrap();
        assert!(s.select_file(text_file()).is_err());
        assert_eq!(s.upload().map(|f| f.file_name.as_str()), Some("first.png"));
    }

    #[test]
    fn valid_image_shows_preview_and_clears_error() {
        let mut s = Session::default();
        s.show_error("old problem");
        s.select_file(png("room.png")).unwrap();
        assert!(s.upload().is_some());
        assert!(!s.upload_zone_visible());
        assert_eq!(s.pending_error(), None);
    }

    #[test]
    fn oversized_file_is_rejected() {
        let mut s = Session::new(1);
        let mut big = png("huge.png");
        big.bytes = vec![0u8; 1024 * 1024 + 1];
        assert_eq!(
            s.select_file(big),
            Err(ClientError::FileTooLarge { limit_mb: 1 })
        );
        assert!(s.upload().is_none());
        assert!(s.pending_error().unwrap().contains("1 MB"));
    }

    #[test]
    fn selecting_style_updates_tip() {
        let mut s = Session::default();
        assert_eq!(s.style, DesignStyle::Modern);
        assert_eq!(
            s.style_tip(),
            "Tip: Focus on clean lines, neutral colors, and functional furniture."
        );
        s.select_style(DesignStyle::Luxury);
        assert_eq!(
            s.style_tip(),
            "Tip: Marble, velvet, gold accents, and sophisticated lighting."
        );
        assert!(!s.is_loading());
    }

    #[test]
    fn blank_prompt_never_starts_enhancement() {
        let mut s = Session::default();
        s.prompt = "   \n\t ".to_string();
        assert_eq!(s.begin_enhance(), Err(ClientError::MissingPrompt));
        assert_eq!(s.pending_error(), Some("Please enter a basic prompt first."));
        assert!(!s.is_loading());
    }

    #[test]
    fn enhancement_request_carries_trimmed_prompt_style_and_room() {
        let mut s = Session::default();
        s.prompt = "  warm wood  ".to_string();
        s.select_style(DesignStyle::MidCentury);
        s.room_type = RoomType::HomeOffice;
        let req = s.begin_enhance().unwrap();
        assert_eq!(req.prompt, "warm wood");
        assert_eq!(req.style, DesignStyle::MidCentury);
        assert_eq!(req.room_type, "home office");
        assert_eq!(s.loading_message(), Some(MSG_ENHANCING));
        assert!(!s.can_generate());
    }

    #[test]
    fn successful_enhancement_replaces_prompt_exactly() {
        let mut s = ready_session();
        s.begin_enhance().unwrap();
        s.finish_enhance(Ok(EnhanceResponse {
            success: true,
            enhanced: Some("X".to_string()),
            ..Default::default()
        }));
        assert_eq!(s.prompt, "X");
        assert!(!s.is_loading());
        assert_eq!(s.pending_error(), None);
    }

    #[test]
    fn failed_enhancement_reports_backend_error() {
        let mut s = ready_session();
        s.begin_enhance().unwrap();
        s.finish_enhance(Ok(EnhanceResponse {
            success: false,
            error: Some("quota exceeded".to_string()),
            ..Default::default()
        }));
        assert_eq!(s.pending_error(), Some("Enhancement failed: quota exceeded"));
        assert_eq!(s.prompt, "cozy reading nook");
        assert!(!s.is_loading());
    }

    #[test]
    fn failed_enhancement_without_message_uses_fallback() {
        let mut s = ready_session();
        s.begin_enhance().unwrap();
        s.finish_enhance(Ok(EnhanceResponse::default()));
        assert_eq!(s.pending_error(), Some("Enhancement failed."));
    }

    #[test]
    fn enhancement_network_error_is_generic() {
        let mut s = ready_session();
        s.begin_enhance().unwrap();
        s.finish_enhance(Err(network_error()));
        assert_eq!(s.pending_error(), Some(MSG_ENHANCE_NETWORK));
        assert!(!s.is_loading());
    }

    #[test]
    fn generation_without_upload_never_starts() {
        let mut s = Session::default();
        s.prompt = "bright and airy".to_string();
        assert_eq!(s.begin_generate(), Err(ClientError::MissingImage));
        assert_eq!(s.pending_error(), Some("Please upload an image first."));
        assert!(!s.is_loading());
    }

    #[test]
    fn generation_without_prompt_never_starts() {
        let mut s = Session::default();
        s.select_file(png("room.png")).unwrap();
        s.prompt = "  ".to_string();
        assert_eq!(s.begin_generate(), Err(ClientError::MissingDescription));
        assert_eq!(s.pending_error(), Some("Please describe your vision."));
        assert!(!s.is_loading());
    }

    #[test]
    fn generation_hides_previous_results_while_loading() {
        let mut s = ready_session();
        s.begin_generate().unwrap();
        s.finish_generate(Ok(GenerateResponse {
            success: true,
            original_image: Some("A".into()),
            generated_image: Some("B".into()),
            ..Default::default()
        }));
        assert!(s.results_visible());

        let req = s.begin_generate().unwrap();
        assert_eq!(req.image.file_name, "room.png");
        assert_eq!(req.prompt, "cozy reading nook");
        assert!(s.result().is_none());
        assert!(!s.results_visible());
        assert_eq!(s.loading_message(), Some(MSG_GENERATING));
    }

    #[test]
    fn successful_generation_shows_both_images_and_final_prompt() {
        let mut s = ready_session();
        s.begin_generate().unwrap();
        s.finish_generate(Ok(GenerateResponse {
            success: true,
            original_image: Some("A".into()),
            generated_image: Some("B".into()),
            prompt: Some("P".into()),
            ..Default::default()
        }));
        let result = s.result().unwrap();
        assert_eq!(result.original_url, "A");
        assert_eq!(result.generated_url, "B");
        assert_eq!(s.download_target(), Some("B"));
        assert_eq!(s.prompt, "P");
        assert!(s.results_visible());
        assert!(!s.placeholder_visible());
        assert!(!s.is_loading());
    }

    #[test]
    fn failed_generation_reports_backend_error_or_fallback() {
        let mut s = ready_session();
        s.begin_generate().unwrap();
        s.finish_generate(Ok(GenerateResponse {
            success: false,
            error: Some("Rate limit reached.".into()),
            ..Default::default()
        }));
        assert_eq!(s.pending_error(), Some("Rate limit reached."));
        assert!(!s.is_loading());

        s.dismiss_error();
        s.begin_generate().unwrap();
        s.finish_generate(Ok(GenerateResponse::default()));
        assert_eq!(s.pending_error(), Some(MSG_GENERATE_FAILED));
        assert!(s.placeholder_visible());
    }

    #[test]
    fn success_without_locations_is_a_failure() {
        let mut s = ready_session();
        s.begin_generate().unwrap();
        let shown = s.finish_generate(Ok(GenerateResponse {
            success: true,
            generated_image: Some("B".into()),
            ..Default::default()
        }));
        assert!(shown.is_none());
        assert_eq!(s.pending_error(), Some(MSG_GENERATE_FAILED));
    }

    #[test]
    fn generation_network_error_is_generic() {
        let mut s = ready_session();
        s.begin_generate().unwrap();
        s.finish_generate(Err(network_error()));
        assert_eq!(s.pending_error(), Some(MSG_GENERATE_NETWORK));
        assert!(s.can_generate());
    }

    #[test]
    fn reset_upload_hides_preview_and_results() {
        let mut s = ready_session();
        s.begin_generate().unwrap();
        s.finish_generate(Ok(GenerateResponse {
            success: true,
            original_image: Some("A".into()),
            generated_image: Some("B".into()),
            ..Default::default()
        }));
        s.reset_upload();
        assert!(s.upload().is_none());
        assert!(s.upload_zone_visible());
        assert!(!s.results_visible());
        assert!(s.placeholder_visible());
        assert_eq!(s.download_target(), None);
    }

    fn generated(s: &mut Session, original: &str, generated: &str) {
        s.begin_generate().unwrap();
        s.finish_generate(Ok(GenerateResponse {
            success: true,
            original_image: Some(original.into()),
            generated_image: Some(generated.into()),
            ..Default::default()
        }));
    }

    #[test]
    fn replacing_the_upload_hides_stale_results() {
        let mut s = Session::default();
        s.select_file(png("first.png")).unwrap();
        s.prompt = "cozy reading nook".to_string();
        generated(&mut s, "/uploads/first.png", "/outputs/first.png");
        assert!(s.results_visible());

        s.select_file(png("second.png")).unwrap();
        assert_eq!(s.upload().map(|f| f.file_name.as_str()), Some("second.png"));
        assert!(s.result().is_none());
        assert!(!s.results_visible());
        assert!(s.placeholder_visible());
    }

    #[test]
    fn rejected_replacement_keeps_results() {
        let mut s = ready_session();
        generated(&mut s, "A", "B");
        assert!(s.select_file(text_file()).is_err());
        assert!(s.results_visible());
    }

    #[test]
    fn pending_error_survives_successful_generation() {
        let mut s = ready_session();
        s.begin_generate().unwrap();
        s.show_error("Enhancement failed: quota exceeded");
        s.finish_generate(Ok(GenerateResponse {
            success: true,
            original_image: Some("A".into()),
            generated_image: Some("B".into()),
            ..Default::default()
        }));
        assert!(s.results_visible());
        assert_eq!(s.pending_error(), Some("Enhancement failed: quota exceeded"));
    }

    #[test]
    fn current_location_matches_the_shown_result() {
        let mut s = ready_session();
        generated(&mut s, "/uploads/a.png", "/outputs/b.png");
        assert!(s.is_current_location(ResultSlot::Original, "/uploads/a.png"));
        assert!(s.is_current_location(ResultSlot::Generated, "/outputs/b.png"));
        assert!(!s.is_current_location(ResultSlot::Original, "/outputs/b.png"));
    }

    #[test]
    fn images_for_a_replaced_result_are_not_current() {
        let mut s = ready_session();
        generated(&mut s, "/uploads/a.png", "/outputs/old.png");
        generated(&mut s, "/uploads/a.png", "/outputs/new.png");
        assert!(!s.is_current_location(ResultSlot::Generated, "/outputs/old.png"));
        assert!(s.is_current_location(ResultSlot::Generated, "/outputs/new.png"));
    }

    #[test]
    fn images_fetched_across_a_reset_are_not_current() {
        let mut s = ready_session();
        generated(&mut s, "/uploads/a.png", "/outputs/b.png");
        s.reset_upload();
        assert!(!s.is_current_location(ResultSlot::Original, "/uploads/a.png"));
        assert!(!s.is_current_location(ResultSlot::Generated, "/outputs/b.png"));

        // A new generation in flight has no result yet
        s.select_file(png("room.png")).unwrap();
        s.begin_generate().unwrap();
        assert!(!s.is_current_location(ResultSlot::Generated, "/outputs/b.png"));
    }

    #[test]
    fn drops_only_land_on_the_idle_upload_zone() {
        let mut s = Session::default();
        assert!(s.accepts_drop());

        s.show_error("Please upload a valid image file.");
        assert!(!s.accepts_drop());
        s.dismiss_error();

        s.select_file(png("room.png")).unwrap();
        assert!(!s.accepts_drop());

        s.reset_upload();
        s.prompt = "bright and airy".to_string();
        s.begin_enhance().unwrap();
        assert!(!s.accepts_drop());
        s.finish_enhance(Err(network_error()));
        s.dismiss_error();
        assert!(s.accepts_drop());
    }

    #[test]
    fn size_is_checked_before_reading() {
        let mut s = Session::new(1);
        assert!(s.check_upload_size("small.png", 1024 * 1024).is_ok());
        assert_eq!(s.pending_error(), None);

        let err = s.check_upload_size("huge.png", 4 * 1024 * 1024 * 1024).unwrap_err();
        assert_eq!(err, ClientError::FileTooLarge { limit_mb: 1 });
        assert_eq!(s.pending_error(), Some("This image is too large. The limit is 1 MB."));
    }
}

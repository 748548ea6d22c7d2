//! HTTP client for the redesign backend
//!
//! Both design endpoints answer with a JSON body even when they fail (the
//! backend sends `{"error": ...}` with a 400/500 status), so bodies are decoded
//! regardless of status. Only a body that is not JSON at all, or a request that
//! never completes, is an [`ApiError`].

use crate::constants::*;
use crate::types::*;
use crate::utils::resolve_url;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("server returned HTTP {status}")]
    Http { status: reqwest::StatusCode },
    #[error("could not decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Clone)]
pub struct StudioClient {
    http: reqwest::Client,
    base_url: String,
}

impl StudioClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("room-redesign-studio/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute form of a location returned by the backend
    pub fn resolve(&self, location: &str) -> String {
        resolve_url(&self.base_url, location)
    }

    /// `POST /api/test_prompt`
    pub async fn enhance_prompt(&self, request: &EnhanceRequest) -> Result<EnhanceResponse, ApiError> {
        let url = self.resolve(ENHANCE_PATH);
        debug!(%url, style = %request.style, room = request.room_type, "Requesting prompt enhancement");
        let response = self.http.post(&url).json(request).send().await?;
        decode_body(response).await
    }

    /// `POST /api/generate` as multipart form data
    pub async fn generate_design(&self, request: GenerateRequest) -> Result<GenerateResponse, ApiError> {
        let url = self.resolve(GENERATE_PATH);
        debug!(
            %url,
            file = %request.image.file_name,
            size = request.image.bytes.len(),
            style = %request.style,
            room = request.room_type,
            "Submitting design generation"
        );

        let image = Part::bytes(request.image.bytes)
            .file_name(request.image.file_name)
            .mime_str(&request.image.mime)?;
        let form = Form::new()
            .part("image", image)
            .text("prompt", request.prompt)
            .text("style", request.style.id())
            .text("room_type", request.room_type);

        let response = self.http.post(&url).multipart(form).send().await?;
        decode_body(response).await
    }

    /// `GET /api/status`
    pub async fn status(&self) -> Result<ServiceStatus, ApiError> {
        let response = self.http.get(self.resolve(STATUS_PATH)).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Http { status: response.status() });
        }
        decode_body(response).await
    }

    /// Download the raw bytes at a backend image location
    pub async fn fetch_image(&self, location: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.resolve(location);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Http { status: response.status() });
        }
        let bytes = response.bytes().await?;
        debug!(%url, size = bytes.len(), "Fetched image");
        Ok(bytes.to_vec())
    }
}

async fn decode_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        debug!(%status, "Backend answered with an error status");
    }
    Ok(serde_json::from_slice(&body)?)
}

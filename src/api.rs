// API client module: a small blocking HTTP client for the code-generation
// service. One endpoint, one request per upload, no retries.

use crate::archive::GeneratedArchive;
use crate::config::Config;
use crate::error::{SessionError, UPLOAD_FAILED_FALLBACK};
use crate::file::SelectedFile;
use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::time::Duration;
use tracing::{info, warn};

pub const GENERATE_PATH: &str = "/generate-code";

/// Anything that turns an uploaded image into a generated archive. The
/// session only talks to this trait, so tests can swap the HTTP client out.
pub trait CodeGenerator {
    fn generate(&self, file: &SelectedFile) -> Result<GeneratedArchive, SessionError>;
}

/// Blocking client for the generation service.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Error body returned by the service on non-2xx responses. `detail` is
/// usually a string but may be an object with a `message`.
#[derive(Deserialize, Debug)]
struct ErrorResponse {
    detail: Option<Value>,
}

impl ApiClient {
    /// Build a client for `base_url`. Generation can take minutes, so the
    /// request timeout is disabled.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, GENERATE_PATH)
    }

    /// Build the multipart body: a single `image` field carrying the file
    /// bytes, its name and its sniffed MIME type.
    fn image_form(file: &SelectedFile) -> Result<multipart::Form, SessionError> {
        let handle = File::open(&file.path).map_err(|e| SessionError::FileUnreadable {
            path: file.path.display().to_string(),
            reason: e.to_string(),
        })?;
        let part = multipart::Part::reader_with_length(handle, file.size)
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(|e| SessionError::UploadFailed(format!("Invalid MIME type {}: {}", file.mime, e)))?;
        Ok(multipart::Form::new().part("image", part))
    }
}

impl CodeGenerator for ApiClient {
    fn generate(&self, file: &SelectedFile) -> Result<GeneratedArchive, SessionError> {
        let url = self.endpoint();
        info!(%url, file = %file.name, size = file.size, "uploading image");

        let form = Self::image_form(file)?;
        let res = self.client.post(&url).multipart(form).send().map_err(|e| {
            warn!(error = %e, "generation request failed");
            SessionError::UploadFailed(format!("Could not reach the generation service: {}", e))
        })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().unwrap_or_default();
            let message = error_message(&body);
            warn!(%status, %message, "generation service returned an error");
            return Err(SessionError::UploadFailed(message));
        }

        let archive = GeneratedArchive::from_reader(res).map_err(|e| {
            warn!(error = %e, "failed to read generated archive");
            SessionError::UploadFailed(format!("Failed to read generated archive: {}", e))
        })?;
        info!(%status, bytes = archive.size(), "archive received");
        Ok(archive)
    }
}

/// Pick the user-facing message out of an error body: a string `detail`,
/// or `detail.message` when `detail` is an object; otherwise the fallback.
pub fn error_message(body: &str) -> String {
    let detail = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|r| r.detail);
    match detail {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(Value::Object(map)) => match map.get("message") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => UPLOAD_FAILED_FALLBACK.to_string(),
        },
        _ => UPLOAD_FAILED_FALLBACK.to_string(),
    }
}

// Errors a session can surface to the user. None of them is fatal: the
// session stores the error and the UI renders it as an inline banner.

use thiserror::Error;

/// Message shown when the upload fails and the service gave no usable detail.
pub const UPLOAD_FAILED_FALLBACK: &str = "Upload failed";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The chosen file is not an image (MIME type does not start with `image/`).
    #[error("Please select a valid image file")]
    InvalidFileType,

    /// The chosen path could not be opened or is not a regular file.
    #[error("Could not read {path}: {reason}")]
    FileUnreadable { path: String, reason: String },

    /// The generation service rejected the upload or could not be reached.
    #[error("{0}")]
    UploadFailed(String),
}

impl SessionError {
    pub fn is_upload_failure(&self) -> bool {
        matches!(self, SessionError::UploadFailed(_))
    }
}

// The file a user picked or dropped. The MIME type is sniffed from the
// leading bytes with `infer`, so a renamed text file is not mistaken for an
// image.

use crate::error::SessionError;
use std::fs;
use std::path::{Path, PathBuf};

const UNKNOWN_MIME: &str = "application/octet-stream";

/// A file chosen for upload, with the metadata a browser `File` would carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl SelectedFile {
    /// Stat the file and sniff its content type. Directories and missing or
    /// unreadable paths yield `FileUnreadable`.
    pub fn from_path(path: &Path) -> Result<Self, SessionError> {
        let unreadable = |reason: String| SessionError::FileUnreadable {
            path: path.display().to_string(),
            reason,
        };

        let meta = fs::metadata(path).map_err(|e| unreadable(e.to_string()))?;
        if !meta.is_file() {
            return Err(unreadable("not a regular file".into()));
        }

        let mime = infer::get_from_path(path)
            .map_err(|e| unreadable(e.to_string()))?
            .map(|kind| kind.mime_type().to_string())
            .unwrap_or_else(|| UNKNOWN_MIME.to_string());

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".into());

        Ok(SelectedFile {
            path: path.to_path_buf(),
            name,
            size: meta.len(),
            mime,
        })
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    /// Size in megabytes with two decimals, e.g. `"1.25 MB"`.
    pub fn display_size(&self) -> String {
        format!("{:.2} MB", self.size as f64 / 1024.0 / 1024.0)
    }
}

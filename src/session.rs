// Upload session: the state machine behind the front end.
//
//   Idle ──select──▶ FileSelected ──upload──▶ Uploading ──ok──▶ Succeeded
//                        ▲   │                    │
//                        │   └──select (replace)  └──err──▶ Failed ──upload (retry)
//                        └───────────── select ─────────────────┘
//
// `reset` returns to Idle from anywhere. Errors never end the session; they
// are kept in `error` and shown next to whatever phase is current.

use crate::api::CodeGenerator;
use crate::archive::{GeneratedArchive, ARCHIVE_FILE_NAME};
use crate::drop::normalize_dropped_path;
use crate::error::SessionError;
use crate::file::SelectedFile;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Coarse status used by the UI to decide what to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    FileSelected,
    Uploading,
    Success,
    Error,
}

#[derive(Debug, Default)]
enum Phase {
    #[default]
    Idle,
    FileSelected(SelectedFile),
    Uploading(SelectedFile),
    Failed(SelectedFile),
    Succeeded {
        file: SelectedFile,
        archive: GeneratedArchive,
    },
}

#[derive(Debug, Default)]
pub struct UploadSession {
    phase: Phase,
    error: Option<SessionError>,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Status {
        match self.phase {
            Phase::Idle => Status::Idle,
            Phase::FileSelected(_) => Status::FileSelected,
            Phase::Uploading(_) => Status::Uploading,
            Phase::Failed(_) => Status::Error,
            Phase::Succeeded { .. } => Status::Success,
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match &self.phase {
            Phase::Idle => None,
            Phase::FileSelected(f) | Phase::Uploading(f) | Phase::Failed(f) => Some(f),
            Phase::Succeeded { file, .. } => Some(file),
        }
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    /// The generated archive; present only after a successful upload.
    pub fn archive(&self) -> Option<&GeneratedArchive> {
        match &self.phase {
            Phase::Succeeded { archive, .. } => Some(archive),
            _ => None,
        }
    }

    /// Whether the upload action should be offered.
    pub fn can_upload(&self) -> bool {
        matches!(self.phase, Phase::FileSelected(_) | Phase::Failed(_))
    }

    /// Whether file selection should be offered.
    pub fn can_select(&self) -> bool {
        !matches!(self.phase, Phase::Uploading(_) | Phase::Succeeded { .. })
    }

    /// Take `file` as the new selection if it is an image; otherwise keep
    /// the current selection and record `InvalidFileType`.
    pub fn select_file(&mut self, file: SelectedFile) {
        if !self.can_select() {
            debug!(status = ?self.status(), "selection ignored");
            return;
        }
        if !file.is_image() {
            debug!(name = %file.name, mime = %file.mime, "rejected non-image file");
            self.reject(SessionError::InvalidFileType);
            return;
        }
        debug!(name = %file.name, mime = %file.mime, size = file.size, "file selected");
        self.phase = Phase::FileSelected(file);
        self.error = None;
    }

    /// File-picker entry point.
    pub fn select_path(&mut self, path: &Path) {
        if !self.can_select() {
            return;
        }
        match SelectedFile::from_path(path) {
            Ok(file) => self.select_file(file),
            Err(e) => self.reject(e),
        }
    }

    /// Drag-and-drop entry point: `raw` is the text the terminal inserted.
    pub fn drop_path(&mut self, raw: &str) {
        if !self.can_select() {
            return;
        }
        match normalize_dropped_path(raw) {
            Some(path) => self.select_path(&path),
            None => self.reject(SessionError::InvalidFileType),
        }
    }

    /// Record a rejected selection. A failed upload's file stays selected,
    /// but the banner now describes the selection problem.
    fn reject(&mut self, err: SessionError) {
        self.phase = match std::mem::take(&mut self.phase) {
            Phase::Failed(file) => Phase::FileSelected(file),
            other => other,
        };
        self.error = Some(err);
    }

    /// Move to `Uploading` and hand back the file to send. `None` (and no
    /// state change) unless a file is selected and no upload is running.
    pub fn begin_upload(&mut self) -> Option<SelectedFile> {
        let file = match std::mem::take(&mut self.phase) {
            Phase::FileSelected(f) | Phase::Failed(f) => f,
            other => {
                self.phase = other;
                debug!(status = ?self.status(), "upload ignored");
                return None;
            }
        };
        self.phase = Phase::Uploading(file.clone());
        self.error = None;
        Some(file)
    }

    /// Complete the running upload. Ignored unless `Uploading`.
    pub fn finish_upload(&mut self, result: Result<GeneratedArchive, SessionError>) {
        let file = match std::mem::take(&mut self.phase) {
            Phase::Uploading(f) => f,
            other => {
                self.phase = other;
                return;
            }
        };
        match result {
            Ok(archive) => {
                info!(name = %file.name, bytes = archive.size(), "code generated");
                debug!(temp = %archive.temp_path().display(), "archive spooled");
                self.phase = Phase::Succeeded { file, archive };
                self.error = None;
            }
            Err(e) => {
                warn!(name = %file.name, error = %e, "upload failed");
                let e = match e {
                    SessionError::UploadFailed(_) => e,
                    other => SessionError::UploadFailed(other.to_string()),
                };
                self.phase = Phase::Failed(file);
                self.error = Some(e);
            }
        }
    }

    /// Upload the selected file through `generator` and wait for the answer.
    /// A no-op returning the current status when there is nothing to upload.
    pub fn upload(&mut self, generator: &dyn CodeGenerator) -> Status {
        if let Some(file) = self.begin_upload() {
            let result = generator.generate(&file);
            self.finish_upload(result);
        }
        self.status()
    }

    /// Save the archive as `generated-ui.zip` inside `dir`. `Ok(None)` when
    /// there is nothing to download.
    pub fn download(&self, dir: &Path) -> io::Result<Option<PathBuf>> {
        self.download_to(&dir.join(ARCHIVE_FILE_NAME))
    }

    /// Save the archive to an explicit destination.
    pub fn download_to(&self, dest: &Path) -> io::Result<Option<PathBuf>> {
        let Some(archive) = self.archive() else {
            return Ok(None);
        };
        let written = archive.save_to(dest)?;
        info!(path = %dest.display(), bytes = written, "archive saved");
        Ok(Some(dest.to_path_buf()))
    }

    /// Drop the file, the archive and any error.
    pub fn reset(&mut self) {
        debug!(status = ?self.status(), "session reset");
        self.phase = Phase::Idle;
        self.error = None;
    }
}

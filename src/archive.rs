// The archive returned by the generation service. The body is spooled to a
// temporary file that lives exactly as long as the archive value: dropping
// it (reset, a new session, or exit) deletes the file.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// File name given to every saved archive.
pub const ARCHIVE_FILE_NAME: &str = "generated-ui.zip";

#[derive(Debug)]
pub struct GeneratedArchive {
    file: NamedTempFile,
    size: u64,
}

impl GeneratedArchive {
    /// Spool everything `reader` yields into a new temporary file.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut file = NamedTempFile::new()?;
        let size = io::copy(&mut reader, file.as_file_mut())?;
        file.as_file_mut().flush()?;
        Ok(GeneratedArchive { file, size })
    }

    pub fn from_bytes(bytes: &[u8]) -> io::Result<Self> {
        Self::from_reader(bytes)
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Location of the temporary copy. Valid until the archive is dropped.
    pub fn temp_path(&self) -> &Path {
        self.file.path()
    }

    /// Copy the archive to `dest`, replacing any existing file.
    pub fn save_to(&self, dest: &Path) -> io::Result<u64> {
        fs::copy(self.file.path(), dest)
    }
}

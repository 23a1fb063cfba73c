// Library root
// -----------
// Terminal front end for the UI code-generation service: pick (or drop) an
// image of a UI design, upload it, and save the generated project archive.
//
// Module responsibilities:
// - `session`: the upload/download state machine; everything else feeds it.
// - `api`: the HTTP call to the generation service, behind `CodeGenerator`.
// - `file`, `drop`, `archive`: the file-system edges (selection, dropped
//   paths, the downloaded archive).
// - `config`: base URL and output directory.
// - `ui`: interactive menu and the one-shot runner used by `main.rs`.
pub mod api;
pub mod archive;
pub mod config;
pub mod drop;
pub mod error;
pub mod file;
pub mod session;
pub mod ui;

pub use api::{ApiClient, CodeGenerator};
pub use config::Config;
pub use error::SessionError;
pub use session::{Status, UploadSession};

// UI layer: renders the upload session in the terminal and turns menu
// choices, picker results and dropped paths into session operations.

use crate::api::CodeGenerator;
use crate::archive::ARCHIVE_FILE_NAME;
use crate::config::Config;
use crate::session::{Status, UploadSession};
use anyhow::{bail, Context, Result};
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Extensions offered by the native file picker. The picker is only a
/// convenience filter; the content is still sniffed after selection.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "tiff", "ico"];

/// Menu entries. Which ones are shown depends on the session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Browse,
    DropPath,
    Generate,
    Download,
    Reset,
    Exit,
}

impl Action {
    fn label(self, session: &UploadSession) -> &'static str {
        match self {
            Action::Browse if session.selected_file().is_some() => "Change File",
            Action::Browse => "Select File",
            Action::DropPath => "Drop or paste a file path",
            Action::Generate => "Generate Code",
            Action::Download => "Download ZIP",
            Action::Reset => "Upload Another",
            Action::Exit => "Exit",
        }
    }
}

/// Actions available for the current session.
pub fn actions_for(session: &UploadSession) -> Vec<Action> {
    match session.status() {
        Status::Success => vec![Action::Download, Action::Reset, Action::Exit],
        // not reachable from main_menu, which blocks in upload_with_spinner
        Status::Uploading => vec![Action::Exit],
        Status::Idle | Status::FileSelected | Status::Error => {
            let mut actions = vec![Action::Browse, Action::DropPath];
            if session.can_upload() {
                actions.push(Action::Generate);
            }
            actions.push(Action::Exit);
            actions
        }
    }
}

/// Interactive loop. Runs until the user picks "Exit".
pub fn main_menu(api: &dyn CodeGenerator, config: &Config) -> Result<()> {
    let mut session = UploadSession::new();
    loop {
        render(&session);
        let actions = actions_for(&session);
        let labels: Vec<&str> = actions.iter().map(|a| a.label(&session)).collect();
        let default = actions
            .iter()
            .position(|a| matches!(a, Action::Generate | Action::Download))
            .unwrap_or(0);
        let selection = Select::new().items(&labels).default(default).interact()?;
        match actions[selection] {
            Action::Browse => {
                // a cancelled picker leaves the session untouched
                if let Some(path) = pick_image() {
                    session.select_path(&path);
                }
            }
            Action::DropPath => {
                let raw: String = Input::new()
                    .with_prompt("Drop your image here")
                    .allow_empty(true)
                    .interact_text()?;
                session.drop_path(&raw);
            }
            Action::Generate => {
                upload_with_spinner(&mut session, api)?;
                if let Some(hint) = retry_hint(&session) {
                    println!("{}", hint.dark_grey());
                }
            }
            Action::Download => {
                if let Err(e) = handle_download(&session, &config.output_dir) {
                    println!("{}", format!("Download failed: {:#}", e).red());
                }
            }
            Action::Reset => session.reset(),
            Action::Exit => break,
        }
    }
    Ok(())
}

/// Non-interactive run: select `image`, upload it, save the archive into
/// the output directory and return where it was written.
pub fn run_once(api: &dyn CodeGenerator, config: &Config, image: &Path) -> Result<PathBuf> {
    let mut session = UploadSession::new();
    session.select_path(image);
    if let Some(err) = session.error() {
        bail!("{}", err);
    }

    if upload_with_spinner(&mut session, api)? != Status::Success {
        let message = session
            .error()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "Upload failed".into());
        bail!("{}", message);
    }

    save_archive(&session, &config.output_dir.join(ARCHIVE_FILE_NAME))
}

fn render(session: &UploadSession) {
    println!();
    println!("{}", "CODEGEN".magenta().bold());
    println!("{}", "Upload a UI design to generate React code".dark_grey());
    println!();

    if session.status() == Status::Success {
        println!("{}", "Code Generated Successfully!".green().bold());
        println!("Your React project is ready for download");
        if let Some(archive) = session.archive() {
            println!("{}", format!("{} bytes", archive.size()).dark_grey());
        }
    } else {
        match session.selected_file() {
            Some(file) => {
                println!("{}", file.name.as_str().bold());
                println!("{}", file.display_size().dark_grey());
            }
            None => {
                println!("Drop your image here");
                println!("{}", "or select a file to browse".dark_grey());
            }
        }
    }

    if let Some(err) = session.error() {
        println!();
        println!("{}", err.to_string().red());
    }
    println!();
}

/// Shown after a failed upload: the file is still held, so the same menu
/// entry retries it.
fn retry_hint(session: &UploadSession) -> Option<&'static str> {
    session
        .error()
        .filter(|e| e.is_upload_failure())
        .map(|_| "Choose \"Generate Code\" to try again, or pick another file.")
}

fn pick_image() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select a UI design")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
}

/// Run the upload behind a spinner. The spinner is the disabled button: the
/// menu is not shown again until the request has finished.
fn upload_with_spinner(session: &mut UploadSession, api: &dyn CodeGenerator) -> Result<Status> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Generating...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let status = session.upload(api);
    spinner.finish_and_clear();
    Ok(status)
}

fn handle_download(session: &UploadSession, output_dir: &Path) -> Result<()> {
    let dest = output_dir.join(ARCHIVE_FILE_NAME);
    if dest.exists()
        && !Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", dest.display()))
            .default(false)
            .interact()?
    {
        return Ok(());
    }
    let saved = save_archive(session, &dest)?;
    println!("{}", format!("Saved {}", saved.display()).green());
    Ok(())
}

fn save_archive(session: &UploadSession, dest: &Path) -> Result<PathBuf> {
    if let Some(dir) = dest.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    session
        .download_to(dest)
        .with_context(|| format!("Failed to write {}", dest.display()))?
        .context("No generated archive to download")
}

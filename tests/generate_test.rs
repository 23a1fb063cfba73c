use codegen_cli::archive::ARCHIVE_FILE_NAME;
use codegen_cli::error::UPLOAD_FAILED_FALLBACK;
use codegen_cli::{ui, ApiClient, Config, SessionError, Status, UploadSession};
use httpmock::prelude::*;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const ZIP_BYTES: &[u8] = b"PK\x03\x04fake-generated-project";

/// A GIF is used because its header is plain ASCII, which keeps the
/// multipart body matchable as text.
fn design_image(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("design.gif");
    fs::write(&path, b"GIF89a\x01\x00\x01\x00\x00\x00\x00;").unwrap();
    path
}

#[test]
fn uploads_image_and_downloads_archive() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/generate-code")
            .body_contains("name=\"image\"")
            .body_contains("filename=\"design.gif\"")
            .body_contains("GIF89a");
        then.status(200)
            .header("content-type", "application/zip")
            .body(ZIP_BYTES);
    });

    let dir = tempfile::tempdir().unwrap();
    let api = ApiClient::new(server.base_url()).unwrap();
    let mut session = UploadSession::new();
    session.select_path(&design_image(&dir));
    assert_eq!(session.status(), Status::FileSelected);
    assert_eq!(session.selected_file().unwrap().mime, "image/gif");

    assert_eq!(session.upload(&api), Status::Success);
    mock.assert();

    let out = tempfile::tempdir().unwrap();
    let saved = session.download(out.path()).unwrap().unwrap();
    assert_eq!(saved, out.path().join(ARCHIVE_FILE_NAME));
    assert_eq!(fs::read(saved).unwrap(), ZIP_BYTES);
}

#[test]
fn error_detail_becomes_the_message() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/generate-code");
        then.status(500)
            .json_body(json!({ "detail": "Google API key is not configured." }));
    });

    let dir = tempfile::tempdir().unwrap();
    let api = ApiClient::new(server.base_url()).unwrap();
    let mut session = UploadSession::new();
    session.select_path(&design_image(&dir));

    assert_eq!(session.upload(&api), Status::Error);
    mock.assert();
    assert_eq!(
        session.error(),
        Some(&SessionError::UploadFailed(
            "Google API key is not configured.".into()
        ))
    );
    assert!(session.archive().is_none());
    assert!(session.can_upload());
}

#[test]
fn error_without_detail_uses_fallback() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/generate-code");
        then.status(502).body("<html>Bad Gateway</html>");
    });

    let dir = tempfile::tempdir().unwrap();
    let api = ApiClient::new(server.base_url()).unwrap();
    let mut session = UploadSession::new();
    session.select_path(&design_image(&dir));

    assert_eq!(session.upload(&api), Status::Error);
    assert_eq!(
        session.error().unwrap().to_string(),
        UPLOAD_FAILED_FALLBACK
    );
}

#[test]
fn nothing_is_sent_without_a_valid_image() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/generate-code");
        then.status(200).body(ZIP_BYTES);
    });
    let api = ApiClient::new(server.base_url()).unwrap();

    let mut session = UploadSession::new();
    assert_eq!(session.upload(&api), Status::Idle);

    let dir = tempfile::tempdir().unwrap();
    let notes = dir.path().join("notes.png");
    fs::write(&notes, "definitely not an image").unwrap();
    session.select_path(&notes);
    assert_eq!(session.error(), Some(&SessionError::InvalidFileType));
    assert_eq!(session.upload(&api), Status::Idle);

    mock.assert_hits(0);
}

#[test]
fn unreachable_service_is_an_upload_failure() {
    // nothing listens on the discard port
    let api = ApiClient::new("http://127.0.0.1:9").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut session = UploadSession::new();
    session.select_path(&design_image(&dir));

    assert_eq!(session.upload(&api), Status::Error);
    assert!(session.error().unwrap().is_upload_failure());
}

#[test]
fn reset_after_success_discards_everything() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/generate-code");
        then.status(200).body(ZIP_BYTES);
    });

    let dir = tempfile::tempdir().unwrap();
    let api = ApiClient::new(server.base_url()).unwrap();
    let mut session = UploadSession::new();
    session.select_path(&design_image(&dir));
    session.upload(&api);
    let temp = session.archive().unwrap().temp_path().to_path_buf();

    session.reset();
    assert_eq!(session.status(), Status::Idle);
    assert!(session.selected_file().is_none());
    assert!(session.error().is_none());
    assert!(!temp.exists());
}

#[test]
fn one_shot_run_saves_into_output_dir() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/generate-code");
        then.status(200).body(ZIP_BYTES);
    });

    let dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let config = Config::default()
        .with_overrides(Some(server.base_url()), Some(out.path().join("projects")));
    let api = ApiClient::from_config(&config).unwrap();

    let saved = ui::run_once(&api, &config, &design_image(&dir)).unwrap();
    mock.assert();
    assert_eq!(saved, out.path().join("projects").join(ARCHIVE_FILE_NAME));
    assert_eq!(fs::read(saved).unwrap(), ZIP_BYTES);
}

#[test]
fn one_shot_run_reports_service_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/generate-code");
        then.status(500)
            .json_body(json!({ "detail": { "message": "Failed to parse generated code." } }));
    });

    let dir = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let config = Config::default()
        .with_overrides(Some(server.base_url()), Some(out.path().to_path_buf()));
    let api = ApiClient::from_config(&config).unwrap();

    let err = ui::run_once(&api, &config, &design_image(&dir)).unwrap_err();
    assert_eq!(err.to_string(), "Failed to parse generated code.");
    assert!(!out.path().join(ARCHIVE_FILE_NAME).exists());
}

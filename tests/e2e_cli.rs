//! CLI end-to-end tests
//!
//! Tests for the memoria command-line interface. None of them reach a real
//! backend; submissions that get past validation talk to a wiremock server.

mod common;

use assert_cmd::prelude::*;
use common::{memory_row, write_png, MockBackend, ANON_KEY};
use predicates::prelude::*;
use std::io::Cursor;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the memoria binary with backend env cleared
#[allow(deprecated)]
fn memoria_cmd() -> Command {
    let mut cmd = Command::cargo_bin("memoria").unwrap();
    cmd.env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_ANON_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_no_args_shows_help() {
    memoria_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    memoria_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("memoria"));
}

#[test]
fn test_cli_submit_help() {
    memoria_cmd()
        .args(["submit", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Upload an image"));
}

#[test]
fn test_validate_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("memoria.toml");
    std::fs::write(
        &config,
        "[backend]\nurl = \"https://demo.supabase.co\"\nanon_key = \"anon\"\n",
    )
    .unwrap();

    memoria_cmd()
        .arg("validate")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Credentials: present"));
}

#[test]
fn test_validate_rejects_bad_quality() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("memoria.toml");
    std::fs::write(&config, "[normalize]\nquality = 150\n").unwrap();

    memoria_cmd()
        .arg("validate")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("quality"));
}

#[test]
fn test_submit_without_title_fails_inline() {
    let dir = tempdir().unwrap();
    let image = dir.path().join("beach.jpg");
    std::fs::write(&image, b"bytes").unwrap();

    memoria_cmd()
        .current_dir(dir.path())
        .args(["submit", "--image"])
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Title is required"));
}

#[test]
fn test_submit_without_image_fails() {
    let dir = tempdir().unwrap();

    memoria_cmd()
        .current_dir(dir.path())
        .args(["submit", "--title", "Beach"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please select an image"));
}

#[test]
fn test_submit_rejects_non_image() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, b"hello").unwrap();

    memoria_cmd()
        .current_dir(dir.path())
        .args(["submit", "--title", "Beach", "--image"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a supported image"));
}

#[test]
fn test_normalize_command_writes_jpeg() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("wide.png");
    let output = dir.path().join("wide.jpg");
    let img = image::RgbImage::from_pixel(300, 100, image::Rgb([0, 128, 255]));
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    std::fs::write(&input, buf.into_inner()).unwrap();

    memoria_cmd()
        .current_dir(dir.path())
        .arg("normalize")
        .arg(&input)
        .arg(&output)
        .args(["--max-width", "150"])
        .assert()
        .success();

    let written = image::open(&output).unwrap();
    assert_eq!((written.width(), written.height()), (150, 50));
}

#[test]
fn test_normalize_missing_input() {
    let dir = tempdir().unwrap();

    memoria_cmd()
        .current_dir(dir.path())
        .args(["normalize", "nope.png", "out.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[tokio::test]
async fn test_submit_reports_every_stage() {
    let backend = MockBackend::start().await;
    backend.accept_uploads().await;
    backend
        .accept_inserts(memory_row("Beach", "", "https://cdn.test/x.jpg"))
        .await;
    let dir = tempdir().unwrap();
    let photo = write_png(dir.path(), "beach.png", 10, 10);
    let workdir = dir.path().to_path_buf();
    let uri = backend.uri();

    // The mock server keeps running on the test runtime while the binary blocks
    let output = tokio::task::spawn_blocking(move || {
        memoria_cmd()
            .current_dir(&workdir)
            .env("SUPABASE_URL", uri)
            .env("SUPABASE_ANON_KEY", ANON_KEY)
            .args(["submit", "--title", "Beach", "--image"])
            .arg(&photo)
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("Memory Created Successfully!"))
        .stderr(
            predicate::str::contains("Validating...")
                .and(predicate::str::contains("Compressing image..."))
                .and(predicate::str::contains("Uploading your memory..."))
                .and(predicate::str::contains("Saving memory...")),
        );
    assert_eq!(backend.requests_to("/rest").await.len(), 1);
}

//! Shared fixtures for integration tests.
//!
//! Provides a [`MockBackend`] wrapping a wiremock server that stands in for
//! the storage and record APIs, plus helpers for writing image fixtures.

#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};

use memoria::config::{BackendConfig, Config};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ANON_KEY: &str = "test-anon-key";

/// Path pattern of uploads into the default bucket.
pub const UPLOAD_PATH: &str = r"^/storage/v1/object/memory-images/\d+_memory_[0-9a-f]{32}\.jpg$";

pub struct MockBackend {
    pub server: MockServer,
}

impl MockBackend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            url: self.uri(),
            anon_key: ANON_KEY.to_string(),
            ..Default::default()
        }
    }

    pub fn config(&self) -> Config {
        Config {
            backend: self.backend_config(),
            ..Default::default()
        }
    }

    /// Accept any upload into the default bucket.
    pub async fn accept_uploads(&self) {
        Mock::given(method("POST"))
            .and(path_regex(UPLOAD_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"Key": "memory-images/x", "Id": "1"})),
            )
            .mount(&self.server)
            .await;
    }

    /// Reject uploads with the given status and JSON body.
    pub async fn reject_uploads(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path_regex(UPLOAD_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer inserts into `memories` with `row`.
    pub async fn accept_inserts(&self, row: Value) {
        Mock::given(method("POST"))
            .and(path("/rest/v1/memories"))
            .respond_with(ResponseTemplate::new(201).set_body_json(row))
            .mount(&self.server)
            .await;
    }

    /// Reject inserts into `memories`.
    pub async fn reject_inserts(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path("/rest/v1/memories"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Requests received so far whose path starts with `prefix`.
    pub async fn requests_to(&self, prefix: &str) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path().starts_with(prefix))
            .collect()
    }
}

/// A row as the record store returns it.
pub fn memory_row(title: &str, description: &str, image_url: &str) -> Value {
    json!({
        "id": "6f1c2a9e-3b7d-4c59-9f0e-2a4b8c1d7e35",
        "title": title,
        "description": description,
        "image_url": image_url,
        "created_at": "2024-05-01T12:34:56.789012+00:00"
    })
}

/// Write a solid-color PNG of the given size.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 80, 40]));
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    let path = dir.join(name);
    std::fs::write(&path, buf.into_inner()).unwrap();
    path
}

//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which builds an isolated [`AppContext`] over a
//! temporary upload directory. The [`TestHarness::with_server`] constructor
//! starts Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use folio_core::config::Config;
use folio_server::context::AppContext;
use folio_server::router::build_router;
use tempfile::TempDir;

/// Test harness wrapping a fully-constructed [`AppContext`] whose uploads
/// live in a temporary directory removed on drop.
pub struct TestHarness {
    pub ctx: AppContext,
    upload_dir: TempDir,
}

impl TestHarness {
    /// Create a new harness with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new harness with a custom configuration. The upload
    /// directory is always replaced by a fresh temp dir.
    pub fn with_config(mut config: Config) -> Self {
        let upload_dir = tempfile::tempdir().expect("failed to create temp upload dir");
        config.storage.upload_dir = upload_dir.path().to_path_buf();
        let ctx = AppContext::new(config);
        Self { ctx, upload_dir }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::with_server_config(Config::default()).await
    }

    /// Start an Axum server with custom config on a random port.
    pub async fn with_server_config(config: Config) -> (Self, SocketAddr) {
        let harness = Self::with_config(config);
        let addr = harness.serve().await;
        (harness, addr)
    }

    /// Start a server whose upload root is a regular file, so every asset
    /// write fails with an I/O error.
    pub async fn with_server_unwritable_uploads() -> (Self, SocketAddr) {
        let mut harness = Self::new();
        let blocked = harness.upload_dir.path().join("blocked");
        std::fs::write(&blocked, b"not a directory").expect("failed to create blocking file");

        let mut config = (*harness.ctx.config).clone();
        config.storage.upload_dir = blocked;
        harness.ctx = AppContext::new(config);

        let addr = harness.serve().await;
        (harness, addr)
    }

    async fn serve(&self) -> SocketAddr {
        let app = build_router(self.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        addr
    }

    /// Root of the upload tree.
    pub fn upload_dir(&self) -> &Path {
        self.upload_dir.path()
    }

    /// On-disk location for an `/uploads/...` reference.
    pub fn asset_path(&self, reference: &str) -> PathBuf {
        let relative = reference
            .strip_prefix("/uploads/")
            .expect("reference should start with /uploads/");
        self.upload_dir.path().join(relative)
    }
}

/// POST a record with only text fields, passed as query parameters.
pub async fn create_via_query(
    client: &reqwest::Client,
    addr: SocketAddr,
    content_type: &str,
    title: &str,
    slug: &str,
) -> serde_json::Value {
    let resp = client
        .post(format!("http://{addr}/content/"))
        .query(&[("type", content_type), ("title", title), ("slug", slug)])
        .send()
        .await
        .expect("create request failed");
    assert_eq!(resp.status(), 201, "create should return 201");
    resp.json().await.expect("create response should be JSON")
}

/// POST a record with text fields and an image as multipart form data.
pub async fn create_with_image(
    client: &reqwest::Client,
    addr: SocketAddr,
    content_type: &str,
    title: &str,
    filename: &str,
    data: Vec<u8>,
) -> reqwest::Response {
    let form = reqwest::multipart::Form::new()
        .text("type", content_type.to_string())
        .text("title", title.to_string())
        .text("slug", title.to_lowercase())
        .part(
            "image",
            reqwest::multipart::Part::bytes(data).file_name(filename.to_string()),
        );

    client
        .post(format!("http://{addr}/content/"))
        .multipart(form)
        .send()
        .await
        .expect("multipart create request failed")
}

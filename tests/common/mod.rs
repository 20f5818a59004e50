//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which lays out media files in a temp directory,
//! scans them, and builds a full [`AppContext`]. The [`TestHarness::with_server`]
//! constructor starts Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;

use reelshelf::config::Config;
use reelshelf::scanner::Scanner;
use reelshelf::server::{create_router, AppContext};

/// Media directory plus the context built from scanning it.
pub struct TestHarness {
    pub dir: TempDir,
    pub ctx: AppContext,
}

impl TestHarness {
    /// Write `files` (relative path, contents) into a fresh directory and scan it.
    pub fn with_files(files: &[(&str, &[u8])]) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        for (name, contents) in files {
            write_file(dir.path(), name, contents);
        }

        let mut config = Config::default();
        config.library.directories = vec![dir.path().to_path_buf()];

        let library = Scanner::from_config(&config.library).scan(&config.library.directories);
        let ctx = AppContext::new(config, library);

        Self { dir, ctx }
    }

    /// The library used by most tests: one complete pair, one video-only
    /// entry, and one poster-only entry.
    pub fn standard() -> Self {
        Self::with_files(&[
            ("movie.FHD.mp4", &[1u8; 1024]),
            ("movie.jpg", b"jpeg-bytes"),
            ("Another Movie.mkv", b"mkv-bytes"),
            ("posters/Another Movie.png", b"png-bytes"),
            ("lonely.mp4", b"lonely-video"),
            ("orphan.webp", b"orphan-poster"),
            ("readme.txt", b"ignored"),
        ])
    }

    pub fn router(&self) -> Router {
        create_router(self.ctx.clone())
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server(self) -> (Self, SocketAddr) {
        let app = self.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (self, addr)
    }
}

pub fn write_file(root: &Path, name: &str, contents: &[u8]) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create parent dir");
    }
    std::fs::write(&path, contents).expect("failed to write file");
}

/// Helper to get response body as bytes
pub async fn body_bytes(body: Body) -> Vec<u8> {
    body.collect().await.unwrap().to_bytes().to_vec()
}

/// Helper to get response body as string
pub async fn body_to_string(body: Body) -> String {
    String::from_utf8(body_bytes(body).await).unwrap()
}

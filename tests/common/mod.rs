//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates a temporary storage directory,
//! default config, and full [`AppContext`]. The [`with_server`] constructor
//! starts Axum on a random port for HTTP-level testing.

use std::net::SocketAddr;
use std::sync::Arc;

use tempfile::TempDir;

use sniprate::config::Config;
use sniprate::images::ImageStore;
use sniprate::server::{create_router, AppContext};

/// Test harness wrapping a fully-constructed [`AppContext`] backed by a
/// temporary images directory.
pub struct TestHarness {
    pub ctx: AppContext,
    images_dir: TempDir,
}

impl TestHarness {
    /// Create a new harness with default configuration and a temp images dir.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new harness with a custom configuration and a temp images dir.
    ///
    /// The configured `images_dir` is always replaced with the temp dir so
    /// tests never touch the working directory.
    pub fn with_config(mut config: Config) -> Self {
        let images_dir = tempfile::tempdir().expect("failed to create temp dir");
        config.storage.images_dir = images_dir.path().to_path_buf();

        let store = ImageStore::new(config.storage.images_dir.clone());
        store.init().expect("failed to init image store");

        let ctx = AppContext {
            config: Arc::new(config),
            store: Arc::new(store),
        };

        Self { ctx, images_dir }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::with_server_config(Config::default()).await
    }

    /// Start an Axum server with custom config on a random port.
    pub async fn with_server_config(config: Config) -> (Self, SocketAddr) {
        let harness = Self::with_config(config);
        let app = create_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    /// Sorted filenames currently present in the images directory.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.images_dir.path())
            .expect("failed to read images dir")
            .map(|entry| {
                entry
                    .expect("failed to read dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}

/// Encode a solid-color RGB image of the given dimensions as PNG bytes.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut img = image::RgbImage::new(width, height);
    for pixel in img.pixels_mut() {
        *pixel = image::Rgb([0, 128, 255]);
    }
    let mut buf = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .expect("failed to encode test PNG");
    buf.into_inner()
}

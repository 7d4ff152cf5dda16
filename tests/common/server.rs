//! Test server lifecycle management
//!
//! Each test gets an isolated server on a random port, backed by its own
//! temporary catalog file.

use super::constants::*;
use super::fixtures::create_test_catalog;
use cluster_recommender_server::catalog::load_catalog;
use cluster_recommender_server::enrichment::{GuardedImageResolver, NoOpImageResolver};
use cluster_recommender_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// When dropped, the server gracefully shuts down and the temp catalog is removed.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    pub port: u16,

    _temp_catalog_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server that never finds album art.
    pub async fn spawn() -> Self {
        Self::spawn_with_image_resolver(Arc::new(NoOpImageResolver)).await
    }

    /// Spawns a server on a random port using `image_resolver` for album art.
    ///
    /// # Panics
    ///
    /// Panics if the catalog cannot be created or loaded, the port cannot be
    /// bound, or the server doesn't become ready within the timeout.
    pub async fn spawn_with_image_resolver(image_resolver: GuardedImageResolver) -> Self {
        let (temp_catalog_dir, catalog_path) =
            create_test_catalog().expect("Failed to create test catalog");
        let catalog = Arc::new(load_catalog(&catalog_path).expect("Failed to load test catalog"));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            bind_address: "127.0.0.1".to_string(),
        };
        let app = make_app(config, catalog, image_resolver);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            _temp_catalog_dir: temp_catalog_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Polls the status route until it answers.
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

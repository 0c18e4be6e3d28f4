//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the web adapter. All concrete implementations are instantiated here.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use vidfetch_core::{DownloadService, FetchJobsPort, MediaFetcherPort, StorageLayout};
use vidfetch_download::{DEFAULT_WORKERS, FetchManager, WorkerDeps, YtDlpConfig, YtDlpFetcher};

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8000;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// Allow all origins.
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// Storage root; `None` means `downloads/` under the working directory.
    pub storage_dir: Option<PathBuf>,
    /// Externally reachable base URL used in `download_url`.
    /// `None` means `http://localhost:{port}`.
    pub public_url: Option<String>,
    /// `yt-dlp` invocation settings.
    pub ytdlp: YtDlpConfig,
    /// Number of concurrent background fetches.
    pub workers: usize,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            storage_dir: None,
            public_url: None,
            ytdlp: YtDlpConfig::default(),
            workers: DEFAULT_WORKERS,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Base URL advertised in download and status URLs.
    pub fn public_base_url(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }

    /// Resolve the storage layout (not created yet).
    pub fn storage(&self) -> Result<StorageLayout> {
        Ok(StorageLayout::resolve(self.storage_dir.as_deref())?)
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Download orchestrator.
    pub downloads: Arc<DownloadService>,
    /// Storage root the file server reads from.
    pub storage: StorageLayout,
}

/// Bootstrap the server with the `yt-dlp` fetcher.
pub async fn bootstrap(config: &ServerConfig) -> Result<AxumContext> {
    let fetcher = YtDlpFetcher::new(config.ytdlp.clone());
    match fetcher.locate() {
        Some(path) => info!(target: "vidfetch.paths", yt_dlp = %path.display(), "Found yt-dlp"),
        None => tracing::warn!(
            target: "vidfetch.paths",
            binary = %config.ytdlp.binary.display(),
            "yt-dlp not found on PATH; downloads will fail until it is installed"
        ),
    }
    bootstrap_with_fetcher(config, Arc::new(fetcher)).await
}

/// Bootstrap the server around any media fetcher.
///
/// Creates the storage root and staging directory, starts the fetch
/// workers and assembles the download service.
pub async fn bootstrap_with_fetcher(
    config: &ServerConfig,
    fetcher: Arc<dyn MediaFetcherPort>,
) -> Result<AxumContext> {
    let storage = config.storage()?;
    storage.ensure()?;

    let public_base_url = config.public_base_url();
    info!(
        target: "vidfetch.paths",
        storage_root = %storage.root().display(),
        staging_root = %storage.staging_root().display(),
        public_base_url = %public_base_url,
        workers = config.workers,
        "Axum bootstrap resolved paths"
    );

    let manager = FetchManager::spawn(
        WorkerDeps {
            fetcher: Arc::clone(&fetcher),
            storage: storage.clone(),
        },
        config.workers,
    );
    let jobs: Arc<dyn FetchJobsPort> = Arc::new(manager);

    let downloads = Arc::new(DownloadService::new(fetcher, jobs, public_base_url));

    Ok(AxumContext { downloads, storage })
}

/// Start the web server and run until Ctrl+C.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let ctx = bootstrap(&config).await?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(target: "vidfetch.http", "vidfetch listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(target: "vidfetch.http", "Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!(target: "vidfetch.http", "Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_defaults_to_localhost_and_port() {
        let config = ServerConfig {
            port: 9001,
            ..ServerConfig::default()
        };
        assert_eq!(config.public_base_url(), "http://localhost:9001");

        let config = ServerConfig {
            public_url: Some("https://videos.example.com".to_string()),
            ..ServerConfig::default()
        };
        assert_eq!(config.public_base_url(), "https://videos.example.com");
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.workers, 2);
        assert_eq!(config.cors, CorsConfig::AllowAll);
        assert_eq!(config.public_base_url(), "http://localhost:8000");
    }
}

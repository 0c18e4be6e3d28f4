//! Main commands enum and shared argument groups.
//!
//! Every option has an environment fallback; a `.env` file in the working
//! directory is loaded before parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Subcommand};

use vidfetch_axum::{CorsConfig, ServerConfig};
use vidfetch_download::YtDlpConfig;

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP download service
    Serve(ServeArgs),

    /// Download a single video into the storage directory and print its path
    Download {
        /// Video URL (youtube.com or youtu.be)
        url: String,
        #[command(flatten)]
        storage: StorageArgs,
        #[command(flatten)]
        fetcher: FetcherArgs,
    },

    /// Check that yt-dlp is installed and runnable
    CheckDeps {
        #[command(flatten)]
        fetcher: FetcherArgs,
    },

    /// Show the resolved storage and staging directories
    Paths {
        #[command(flatten)]
        storage: StorageArgs,
    },
}

/// Storage location.
#[derive(Args, Debug, Clone, Default)]
pub struct StorageArgs {
    /// Directory where downloaded files are stored [default: ./downloads]
    #[arg(long, env = "VIDFETCH_STORAGE_DIR")]
    pub storage_dir: Option<PathBuf>,
}

/// yt-dlp invocation settings.
#[derive(Args, Debug, Clone)]
pub struct FetcherArgs {
    /// yt-dlp executable name or path
    #[arg(long = "yt-dlp", env = "VIDFETCH_YT_DLP", default_value = "yt-dlp")]
    pub yt_dlp: PathBuf,

    /// yt-dlp format selector
    #[arg(long, env = "VIDFETCH_FORMAT", default_value = "best")]
    pub format: String,

    /// Seconds to wait for metadata resolution
    #[arg(long, env = "VIDFETCH_METADATA_TIMEOUT", default_value_t = 120)]
    pub metadata_timeout_secs: u64,
}

impl FetcherArgs {
    pub fn to_config(&self) -> YtDlpConfig {
        YtDlpConfig {
            binary: self.yt_dlp.clone(),
            format: self.format.clone(),
            metadata_timeout: Duration::from_secs(self.metadata_timeout_secs),
        }
    }
}

/// Options for `vidfetch serve`.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "VIDFETCH_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "VIDFETCH_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Public base URL used in download links [default: http://localhost:<port>]
    #[arg(long, env = "VIDFETCH_PUBLIC_URL")]
    pub public_url: Option<String>,

    /// Number of concurrent background downloads
    #[arg(long, env = "VIDFETCH_WORKERS", default_value_t = 2)]
    pub workers: usize,

    /// Allowed CORS origin (repeatable; all origins when omitted)
    #[arg(long = "allowed-origin", env = "VIDFETCH_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    #[command(flatten)]
    pub storage: StorageArgs,

    #[command(flatten)]
    pub fetcher: FetcherArgs,
}

impl ServeArgs {
    /// Build the web server configuration.
    pub fn to_server_config(&self) -> ServerConfig {
        let cors = if self.allowed_origins.is_empty() {
            CorsConfig::AllowAll
        } else {
            CorsConfig::AllowOrigins(self.allowed_origins.clone())
        };
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            storage_dir: self.storage.storage_dir.clone(),
            public_url: self.public_url.clone(),
            ytdlp: self.fetcher.to_config(),
            workers: self.workers,
            cors,
        }
    }
}

//! Axum web server adapter for vidfetch.
//!
//! Exposes the download orchestrator, the stored-file server and the job
//! status API over HTTP. [`bootstrap`] is the composition root that wires
//! the `yt-dlp` fetcher and the fetch manager into the core service.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings for integration-only crates
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tower as _;
#[cfg(test)]
use tracing_subscriber as _;

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{
    AxumContext, CorsConfig, ServerConfig, bootstrap, bootstrap_with_fetcher, start_server,
};
pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;

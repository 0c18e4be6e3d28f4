//! Core domain types, ports and services for vidfetch.
//!
//! This crate holds everything that does not depend on a concrete
//! infrastructure choice: request validation, filename sanitization,
//! background job records, storage layout rules and the download
//! orchestrator. Adapters (`vidfetch-download`, `vidfetch-axum`) implement
//! the ports defined here and wire them together.
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use domain::{
    BackgroundFetchJob, DEFAULT_EXTENSION, DownloadRequest, DownloadTicket, HOSTING_MARKERS,
    JobId, JobRecord, JobStatus, MediaMetadata,
};
pub use paths::{
    DEFAULT_STORAGE_DIR, PathError, STAGING_DIR_NAME, StorageLayout, validate_file_name,
};
pub use ports::{CoreError, FetchError, FetchJobsPort, FetchRequest, MediaFetcherPort};
pub use services::{DOWNLOAD_INITIATED, DownloadService};
pub use utils::filename::{
    DEFAULT_TITLE, FORBIDDEN_CHARS, safe_filename_from_title, sanitize_filename, title_or_default,
};

// Silence unused dev-dependency warnings for integration-only crates
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tempfile as _;

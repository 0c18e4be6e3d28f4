//! HTTP request handlers for the Axum web server.
//!
//! Handlers are thin wrappers that delegate to `DownloadService` or read
//! from the storage root.

pub mod downloads;
pub mod files;
pub mod jobs;

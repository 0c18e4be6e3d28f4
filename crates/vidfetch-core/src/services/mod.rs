//! Core services - the application's business logic layer.
//!
//! Services here are pure orchestrators between ports (trait interfaces)
//! and domain logic. They don't know about concrete implementations.

mod download_service;

pub use download_service::{DOWNLOAD_INITIATED, DownloadService};

//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (subprocesses, filesystem, HTTP).
//!
//! # Structure
//!
//! - `request` - Incoming download request validation
//! - `media` - Metadata reported by the media fetcher
//! - `job` - Background fetch jobs, their status records and tickets

mod job;
mod media;
mod request;

pub use job::{BackgroundFetchJob, DownloadTicket, JobId, JobRecord, JobStatus};
pub use media::{DEFAULT_EXTENSION, MediaMetadata};
pub use request::{DownloadRequest, HOSTING_MARKERS};

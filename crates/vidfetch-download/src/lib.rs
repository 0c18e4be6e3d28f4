//! Media fetching adapters for vidfetch.
//!
//! - `ytdlp` - [`YtDlpFetcher`], the `yt-dlp` subprocess implementation of
//!   [`MediaFetcherPort`]
//! - `manager` - [`FetchManager`], a small worker pool that runs background
//!   fetch jobs and keeps their status records, implementing
//!   [`FetchJobsPort`]

// Re-export core types for convenience
pub use vidfetch_core::ports::{FetchError, FetchJobsPort, FetchRequest, MediaFetcherPort};

mod manager;
mod ytdlp;

pub use manager::{CompletedJob, DEFAULT_WORKERS, FetchManager, WorkerDeps, run_job};
pub use ytdlp::{
    DEFAULT_BINARY, DEFAULT_FORMAT, DEFAULT_METADATA_TIMEOUT, YtDlpConfig, YtDlpFetcher,
};

//! Media fetcher port.
//!
//! The media fetcher is the opaque collaborator that knows how to talk to
//! video hosts. It offers two capabilities: resolve metadata for a URL
//! without downloading, and download a URL into a directory.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::MediaMetadata;

/// Error type for media fetcher operations.
///
/// Designed to be serializable and cloneable, so it does not wrap
/// `std::io::Error` directly; the kind and message are captured as strings.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum FetchError {
    /// The fetcher executable could not be started.
    #[error("Media fetcher not installed or not executable: {binary}")]
    NotInstalled {
        /// Binary that was attempted.
        binary: String,
    },

    /// The fetcher ran but reported failure.
    #[error("Media fetcher failed: {0}")]
    ProcessFailed(String),

    /// The fetcher's output could not be interpreted.
    #[error("Invalid fetcher output: {0}")]
    InvalidOutput(String),

    /// The fetcher did not answer in time.
    #[error("Media fetcher timed out after {seconds}s")]
    TimedOut {
        /// Timeout that elapsed.
        seconds: u64,
    },

    /// The fetcher reported success but no output file was found.
    #[error("Downloaded file not found in {0}")]
    OutputMissing(String),

    /// I/O error while staging or committing a file.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The operation or kind of I/O error.
        kind: String,
        /// Detailed error message.
        message: String,
    },
}

impl FetchError {
    /// Create an I/O error from kind and message strings.
    pub fn io(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error from a `std::io::Error`.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        Self::Io {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Request to download a URL into a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Source URL.
    pub url: String,
    /// Directory the fetcher writes into.
    pub output_dir: PathBuf,
    /// File stem; the fetcher appends the extension of the format it picks.
    pub file_stem: String,
}

/// Capability interface over the external media fetcher.
///
/// # Usage
///
/// ```ignore
/// let fetcher: Arc<dyn MediaFetcherPort> = /* ... */;
/// let meta = fetcher.resolve_metadata("https://youtu.be/abc").await?;
/// let path = fetcher.fetch(&FetchRequest { .. }).await?;
/// ```
#[async_trait]
pub trait MediaFetcherPort: Send + Sync {
    /// Resolve metadata for `url` without downloading media bytes.
    async fn resolve_metadata(&self, url: &str) -> Result<MediaMetadata, FetchError>;

    /// Download `request.url` into `request.output_dir`.
    ///
    /// Returns the path of the produced file, whose extension is chosen by
    /// the fetcher's own format selection.
    async fn fetch(&self, request: &FetchRequest) -> Result<PathBuf, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_captures_kind() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let fetch_err = FetchError::from_io_error(&err);
        assert!(matches!(fetch_err, FetchError::Io { ref kind, .. } if kind == "permission denied"));
    }

    #[test]
    fn errors_serialize() {
        let err = FetchError::TimedOut { seconds: 30 };
        let json = serde_json::to_string(&err).unwrap();
        let back: FetchError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }
}

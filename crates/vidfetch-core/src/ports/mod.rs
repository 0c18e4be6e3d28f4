//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No subprocess or HTTP types in any signature
//! - The media fetcher exposes exactly two capabilities: resolve metadata
//!   and fetch to a directory
//! - Background execution is hidden behind `FetchJobsPort`

pub mod fetch_jobs;
pub mod media_fetcher;

use thiserror::Error;

pub use fetch_jobs::FetchJobsPort;
pub use media_fetcher::{FetchError, FetchRequest, MediaFetcherPort};

use crate::paths::PathError;

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain.
/// Adapters should map this to their own error types (HTTP status codes,
/// CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Bad or missing input (client fault).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The media fetcher failed while resolving or downloading.
    #[error("Upstream fetch error: {0}")]
    UpstreamFetch(String),

    /// A requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage directory problem (creation, permissions, rename).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<FetchError> for CoreError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Io { .. } => Self::Storage(err.to_string()),
            other => Self::UpstreamFetch(other.to_string()),
        }
    }
}

impl From<PathError> for CoreError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::EmptyPath | PathError::InvalidFileName(_) => {
                Self::Validation(err.to_string())
            }
            other => Self::Storage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_map_to_upstream_except_io() {
        let upstream: CoreError = FetchError::ProcessFailed("exit 1".to_string()).into();
        assert!(matches!(upstream, CoreError::UpstreamFetch(_)));

        let timed_out: CoreError = FetchError::TimedOut { seconds: 5 }.into();
        assert!(matches!(timed_out, CoreError::UpstreamFetch(_)));

        let io: CoreError = FetchError::io("rename", "denied").into();
        assert!(matches!(io, CoreError::Storage(_)));
    }

    #[test]
    fn path_errors_split_between_validation_and_storage() {
        let invalid: CoreError = PathError::InvalidFileName("../x".to_string()).into();
        assert!(matches!(invalid, CoreError::Validation(_)));

        let storage: CoreError = PathError::NotWritable {
            path: "/root".into(),
            reason: "denied".to_string(),
        }
        .into();
        assert!(matches!(storage, CoreError::Storage(_)));
    }
}

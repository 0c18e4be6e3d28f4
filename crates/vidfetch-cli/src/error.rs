//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` to exit codes and user-facing messages.

use thiserror::Error;
use vidfetch_core::CoreError;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad input (invalid URL, bad file name).
    #[error("{0}")]
    Validation(String),

    /// yt-dlp failed.
    #[error("Download failed: {0}")]
    Fetch(String),

    /// Storage directory problem.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A required external tool is missing.
    #[error("Missing dependency: {0}")]
    Dependency(String),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits:
    /// - 1: General error
    /// - 2: Invalid input
    /// - 69: Required service unavailable
    /// - 74: I/O error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Dependency(_) => 69, // EX_UNAVAILABLE
            Self::Storage(_) => 74,    // EX_IOERR
            Self::Fetch(_) | Self::Other(_) => 1,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::UpstreamFetch(msg) => Self::Fetch(msg),
            CoreError::Storage(msg) => Self::Storage(msg),
            CoreError::NotFound(msg) | CoreError::Internal(msg) => Self::Other(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(CliError::from(CoreError::Validation("x".into())).exit_code(), 2);
        assert_eq!(CliError::from(CoreError::UpstreamFetch("x".into())).exit_code(), 1);
        assert_eq!(CliError::from(CoreError::Storage("x".into())).exit_code(), 74);
        assert_eq!(CliError::Dependency("yt-dlp".into()).exit_code(), 69);
    }

    #[test]
    fn validation_message_is_shown_verbatim() {
        let err = CliError::from(CoreError::Validation("Invalid YouTube URL".into()));
        assert_eq!(err.to_string(), "Invalid YouTube URL");
    }
}

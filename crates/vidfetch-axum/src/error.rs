//! Axum-specific error types and mappings.
//!
//! Maps `CoreError` and `PathError` to HTTP status codes and the JSON
//! error body. Server-side failures are reported to clients with a fixed
//! message; the detailed cause only goes to the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use vidfetch_core::{CoreError, PathError};

/// Message returned when the media fetcher fails.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "An error occurred during the video download";

/// Message returned for any other server-side failure.
pub const INTERNAL_FAILURE_MESSAGE: &str = "Internal server error";

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error; the message is shown to the client as is.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::BadRequest(msg),
            CoreError::NotFound(msg) => Self::NotFound(msg),
            // Logged with its URL where the fetch failed.
            CoreError::UpstreamFetch(_) => Self::Internal(UPSTREAM_FAILURE_MESSAGE.to_string()),
            CoreError::Storage(detail) | CoreError::Internal(detail) => {
                tracing::error!(target: "vidfetch.http", error = %detail, "Request failed");
                Self::Internal(INTERNAL_FAILURE_MESSAGE.to_string())
            }
        }
    }
}

impl From<PathError> for HttpError {
    fn from(err: PathError) -> Self {
        CoreError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn core_errors_map_to_status_codes() {
        let cases = [
            (CoreError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (CoreError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (CoreError::UpstreamFetch("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (CoreError::Storage("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (CoreError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            let response = HttpError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn upstream_detail_is_not_exposed() {
        let err = HttpError::from(CoreError::UpstreamFetch("ERROR: secret stderr".into()));
        assert!(matches!(err, HttpError::Internal(ref m) if m == UPSTREAM_FAILURE_MESSAGE));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn upstream_failures_are_not_logged_again() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let _ = HttpError::from(CoreError::UpstreamFetch("ERROR: private video".into()));
            let _ = HttpError::from(CoreError::Internal("queue closed".into()));
        });

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(!logs.contains("private video"), "{logs}");
        assert!(logs.contains("queue closed"), "{logs}");
    }

    #[test]
    fn invalid_file_name_is_bad_request() {
        let err = HttpError::from(PathError::InvalidFileName("../x".into()));
        assert!(matches!(err, HttpError::BadRequest(_)));
    }
}

//! Stored file handler.
//!
//! Serves `{storage_root}/{filename}` as an attachment. The filename must
//! be a single plain path component; anything else is rejected before the
//! filesystem is touched.

use std::io::ErrorKind;
use std::path::Path as FsPath;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio_util::io::ReaderStream;

use crate::error::HttpError;
use crate::state::AppState;

const NOT_FOUND_MESSAGE: &str = "File not found";

/// Content type for a stored file, by extension.
pub fn content_type_for(filename: &str) -> &'static str {
    let ext = FsPath::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        Some("m4a") => "audio/mp4",
        Some("mp3") => "audio/mpeg",
        _ => "application/octet-stream",
    }
}

/// `Content-Disposition` value with an ASCII fallback and the exact UTF-8 name.
pub fn attachment_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
        urlencoding::encode(filename)
    )
}

/// Stream a stored file.
pub async fn serve(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, HttpError> {
    let path = state.storage.stored_path(&filename)?;

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(HttpError::NotFound(NOT_FOUND_MESSAGE.to_string()));
        }
        Err(e) => {
            return Err(HttpError::from(vidfetch_core::CoreError::Storage(format!(
                "open {}: {e}",
                path.display()
            ))));
        }
    };

    let metadata = file.metadata().await.map_err(|e| {
        HttpError::from(vidfetch_core::CoreError::Storage(format!(
            "stat {}: {e}",
            path.display()
        )))
    })?;
    if !metadata.is_file() {
        return Err(HttpError::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }

    tracing::debug!(
        target: "vidfetch.http",
        filename = %filename,
        bytes = metadata.len(),
        "Serving stored file"
    );

    let disposition = HeaderValue::from_str(&attachment_disposition(&filename))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    let headers = [
        (CONTENT_TYPE, HeaderValue::from_static(content_type_for(&filename))),
        (CONTENT_LENGTH, HeaderValue::from(metadata.len())),
        (CONTENT_DISPOSITION, disposition),
    ];

    let body = Body::from_stream(ReaderStream::new(file));
    Ok((StatusCode::OK, headers, body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_by_extension() {
        assert_eq!(content_type_for("a.mp4"), "video/mp4");
        assert_eq!(content_type_for("a.MP4"), "video/mp4");
        assert_eq!(content_type_for("a.webm"), "video/webm");
        assert_eq!(content_type_for("a.mkv"), "video/x-matroska");
        assert_eq!(content_type_for("a.m4a"), "audio/mp4");
        assert_eq!(content_type_for("a.mp3"), "audio/mpeg");
        assert_eq!(content_type_for("a.bin"), "application/octet-stream");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    #[test]
    fn disposition_keeps_exact_name_encoded() {
        let value = attachment_disposition("Café \"live\".mp4");
        assert!(value.starts_with("attachment; filename=\"Caf_ _live_.mp4\""));
        assert!(value.ends_with("filename*=UTF-8''Caf%C3%A9%20%22live%22.mp4"));
        assert!(HeaderValue::from_str(&value).is_ok());
    }
}

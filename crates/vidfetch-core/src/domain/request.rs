//! Download request validation.

use crate::ports::CoreError;

/// Domain substrings that identify a supported video host.
pub const HOSTING_MARKERS: &[&str] = &["youtube.com", "youtu.be"];

/// A validated request to download a video.
///
/// Constructed per incoming request and discarded once the background
/// job has been dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    url: String,
}

impl DownloadRequest {
    /// Validate a raw URL string.
    ///
    /// The URL is trimmed; it must be non-empty and contain one of
    /// [`HOSTING_MARKERS`].
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let url = raw.trim();

        if url.is_empty() {
            return Err(CoreError::Validation("No URL provided".to_string()));
        }

        if !HOSTING_MARKERS.iter().any(|marker| url.contains(marker)) {
            return Err(CoreError::Validation("Invalid YouTube URL".to_string()));
        }

        Ok(Self {
            url: url.to_string(),
        })
    }

    /// The validated URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Consume the request, returning the URL.
    pub fn into_url(self) -> String {
        self.url
    }
}

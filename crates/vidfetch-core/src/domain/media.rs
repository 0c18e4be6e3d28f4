//! Metadata reported by the media fetcher.

use serde::{Deserialize, Serialize};

/// Container extension assumed when the fetcher does not report one.
pub const DEFAULT_EXTENSION: &str = "mp4";

/// Metadata resolved for a URL without downloading any media bytes.
///
/// Every field is optional: the fetcher may omit any of them. Unknown
/// fields in the fetcher's JSON output are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaMetadata {
    /// Extractor-specific video identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Human-readable title.
    #[serde(default)]
    pub title: Option<String>,
    /// Container extension of the format the fetcher will select.
    #[serde(default)]
    pub ext: Option<String>,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Channel or uploader name.
    #[serde(default)]
    pub uploader: Option<String>,
    /// Canonical page URL.
    #[serde(default)]
    pub webpage_url: Option<String>,
}

impl MediaMetadata {
    /// Metadata carrying only a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// The extension the stored file is expected to carry.
    ///
    /// Uses the reported `ext` when it is a short alphanumeric token,
    /// otherwise [`DEFAULT_EXTENSION`].
    pub fn container_extension(&self) -> String {
        self.ext
            .as_deref()
            .map(str::trim)
            .filter(|ext| {
                !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .map_or_else(|| DEFAULT_EXTENSION.to_string(), str::to_ascii_lowercase)
    }
}

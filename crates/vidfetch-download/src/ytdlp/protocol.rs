//! Interpretation of `yt-dlp` output.
//!
//! `--dump-json` prints one JSON object per line (a single line with
//! `--no-playlist`). `--print after_move:filepath` prints the final path of
//! the produced file as the last line of stdout.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use vidfetch_core::{FetchError, MediaMetadata};

/// Suffixes `yt-dlp` uses for incomplete or auxiliary files.
const PARTIAL_SUFFIXES: &[&str] = &["part", "ytdl", "temp"];

/// Parse the first JSON object emitted by `--dump-json`.
pub fn parse_metadata(stdout: &str) -> Result<MediaMetadata, FetchError> {
    let line = stdout
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| FetchError::InvalidOutput("empty metadata output".to_string()))?;

    serde_json::from_str(line).map_err(|e| FetchError::InvalidOutput(e.to_string()))
}

/// The path reported by `--print after_move:filepath`, if any.
pub fn parse_printed_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .rfind(|l| !l.is_empty())
        .map(PathBuf::from)
}

/// Describe a non-zero exit, preferring the tool's own error text.
pub fn failure_reason(status: ExitStatus, stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr).trim().to_string();
    if text.is_empty() {
        format!("exited with status {status}")
    } else {
        text
    }
}

/// Whether `path` looks like a finished file produced for `stem`.
pub fn is_output_for(path: &Path, stem: &str) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let Some(rest) = name.strip_prefix(stem).and_then(|r| r.strip_prefix('.')) else {
        return false;
    };
    !rest.is_empty()
        && !rest.contains('.')
        && !PARTIAL_SUFFIXES.contains(&rest.to_ascii_lowercase().as_str())
}

/// Scan `dir` for a finished file produced for `stem`.
///
/// Used when the printed path is missing or unusable.
pub async fn find_in_dir(dir: &Path, stem: &str) -> Result<Option<PathBuf>, FetchError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| FetchError::from_io_error(&e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| FetchError::from_io_error(&e))?
    {
        let path = entry.path();
        let is_file = entry.file_type().await.is_ok_and(|t| t.is_file());
        if is_file && is_output_for(&path, stem) {
            return Ok(Some(path));
        }
    }

    Ok(None)
}

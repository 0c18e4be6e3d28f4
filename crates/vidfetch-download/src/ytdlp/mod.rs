//! `yt-dlp` subprocess bridge.
//!
//! Implements [`MediaFetcherPort`] by running the `yt-dlp` executable:
//! `--dump-json` for metadata, and a plain download with
//! `--print after_move:filepath` to learn where the file ended up.

mod args;
mod protocol;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;

use vidfetch_core::{FetchError, FetchRequest, MediaFetcherPort, MediaMetadata};

use self::args::{fetch_args, metadata_args, output_template};
use self::protocol::{failure_reason, find_in_dir, is_output_for, parse_metadata, parse_printed_path};

/// Executable looked up on `PATH` when no explicit binary is configured.
pub const DEFAULT_BINARY: &str = "yt-dlp";

/// Format selector passed to `-f`.
pub const DEFAULT_FORMAT: &str = "best";

/// Upper bound on a metadata lookup.
pub const DEFAULT_METADATA_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for [`YtDlpFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YtDlpConfig {
    /// Executable name or path.
    pub binary: PathBuf,
    /// Format selector.
    pub format: String,
    /// Timeout for metadata resolution.
    pub metadata_timeout: Duration,
}

impl Default for YtDlpConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_BINARY),
            format: DEFAULT_FORMAT.to_string(),
            metadata_timeout: DEFAULT_METADATA_TIMEOUT,
        }
    }
}

/// Media fetcher backed by the `yt-dlp` executable.
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    config: YtDlpConfig,
}

impl YtDlpFetcher {
    pub const fn new(config: YtDlpConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &YtDlpConfig {
        &self.config
    }

    /// Resolve the configured binary to an absolute path, if it can be found.
    pub fn locate(&self) -> Option<PathBuf> {
        which::which(&self.config.binary).ok()
    }

    /// Version string reported by `yt-dlp --version`.
    pub async fn version(&self) -> Result<String, FetchError> {
        let output = self
            .run_to_completion(&["--version".into()], Some(Duration::from_secs(30)))
            .await?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.config.binary);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    fn spawn_error(&self, err: &std::io::Error) -> FetchError {
        if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) {
            FetchError::NotInstalled {
                binary: self.config.binary.display().to_string(),
            }
        } else {
            FetchError::ProcessFailed(format!("Failed to spawn: {err}"))
        }
    }

    /// Run to exit and collect output; a non-zero exit is an error.
    ///
    /// Dropping the child on timeout kills it.
    async fn run_to_completion(
        &self,
        args: &[std::ffi::OsString],
        timeout: Option<Duration>,
    ) -> Result<Output, FetchError> {
        let child = self
            .command()
            .args(args)
            .spawn()
            .map_err(|e| self.spawn_error(&e))?;

        let waited = child.wait_with_output();
        let output = match timeout {
            Some(limit) => tokio::time::timeout(limit, waited)
                .await
                .map_err(|_| FetchError::TimedOut {
                    seconds: limit.as_secs(),
                })?,
            None => waited.await,
        }
        .map_err(|e| FetchError::ProcessFailed(e.to_string()))?;

        if !output.status.success() {
            return Err(FetchError::ProcessFailed(failure_reason(
                output.status,
                &output.stderr,
            )));
        }
        Ok(output)
    }

    /// Run a download, streaming stdout so progress shows up in debug logs.
    async fn run_download(&self, args: Vec<std::ffi::OsString>) -> Result<String, FetchError> {
        let mut child = self
            .command()
            .args(args)
            .spawn()
            .map_err(|e| self.spawn_error(&e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| FetchError::ProcessFailed("Missing stdout".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| FetchError::ProcessFailed("Missing stderr".to_string()))?;

        let mut stderr_reader = BufReader::new(stderr);
        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stderr_reader.read_to_end(&mut buf).await;
            buf
        });

        let mut printed = String::new();
        let mut lines = BufReader::new(stdout).lines();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| FetchError::ProcessFailed(e.to_string()))?
        {
            tracing::debug!(target: "vidfetch.download", "yt-dlp: {line}");
            printed.push_str(&line);
            printed.push('\n');
        }

        let status = child
            .wait()
            .await
            .map_err(|e| FetchError::ProcessFailed(e.to_string()))?;
        let stderr_buf = stderr_task.await.unwrap_or_default();

        if !status.success() {
            return Err(FetchError::ProcessFailed(failure_reason(status, &stderr_buf)));
        }
        Ok(printed)
    }

    /// Pick the produced file: the printed path if it is a finished file
    /// inside `dir`, otherwise whatever a scan of `dir` finds.
    async fn produced_file(
        dir: &Path,
        stem: &str,
        printed: Option<PathBuf>,
    ) -> Result<PathBuf, FetchError> {
        if let Some(path) = printed {
            let inside = path.starts_with(dir) && is_output_for(&path, stem);
            if inside && tokio::fs::metadata(&path).await.is_ok_and(|m| m.is_file()) {
                return Ok(path);
            }
            tracing::debug!(
                target: "vidfetch.download",
                printed = %path.display(),
                "Printed path unusable, scanning staging directory"
            );
        }

        find_in_dir(dir, stem)
            .await?
            .ok_or_else(|| FetchError::OutputMissing(dir.display().to_string()))
    }
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::new(YtDlpConfig::default())
    }
}

#[async_trait]
impl MediaFetcherPort for YtDlpFetcher {
    async fn resolve_metadata(&self, url: &str) -> Result<MediaMetadata, FetchError> {
        let args = metadata_args(&self.config.format, url);
        let output = self
            .run_to_completion(&args, Some(self.config.metadata_timeout))
            .await?;
        parse_metadata(&String::from_utf8_lossy(&output.stdout))
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<PathBuf, FetchError> {
        let template = output_template(&request.output_dir, &request.file_stem);
        let args = fetch_args(&self.config.format, template, &request.url);

        tracing::debug!(
            target: "vidfetch.download",
            url = %request.url,
            dir = %request.output_dir.display(),
            "Starting yt-dlp download"
        );

        let stdout = self.run_download(args).await?;
        Self::produced_file(
            &request.output_dir,
            &request.file_stem,
            parse_printed_path(&stdout),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_binary() -> YtDlpFetcher {
        YtDlpFetcher::new(YtDlpConfig {
            binary: PathBuf::from("/nonexistent/definitely-not-yt-dlp"),
            ..YtDlpConfig::default()
        })
    }

    #[test]
    fn default_config() {
        let config = YtDlpConfig::default();
        assert_eq!(config.binary, PathBuf::from("yt-dlp"));
        assert_eq!(config.format, "best");
        assert_eq!(config.metadata_timeout, Duration::from_secs(120));
    }

    #[test]
    fn locate_fails_for_missing_binary() {
        assert_eq!(missing_binary().locate(), None);
    }

    #[tokio::test]
    async fn missing_binary_is_not_installed() {
        let err = missing_binary()
            .resolve_metadata("https://youtu.be/abc")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::NotInstalled { .. }), "{err:?}");

        let err = missing_binary().version().await.unwrap_err();
        assert!(matches!(err, FetchError::NotInstalled { .. }));
    }

    #[tokio::test]
    async fn printed_path_outside_staging_falls_back_to_scan() {
        let dir = tempfile::tempdir().unwrap();
        let stage = dir.path().join("stage");
        std::fs::create_dir(&stage).unwrap();
        std::fs::write(stage.join("clip.webm"), b"x").unwrap();
        std::fs::write(dir.path().join("clip.mp4"), b"x").unwrap();

        let picked =
            YtDlpFetcher::produced_file(&stage, "clip", Some(dir.path().join("clip.mp4")))
                .await
                .unwrap();
        assert_eq!(picked, stage.join("clip.webm"));
    }

    #[tokio::test]
    async fn nothing_produced_is_output_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = YtDlpFetcher::produced_file(dir.path(), "clip", None)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::OutputMissing(_)));
    }
}

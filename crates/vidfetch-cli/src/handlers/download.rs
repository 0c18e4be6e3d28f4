//! Download command handler.
//!
//! Runs the same validation, naming and stage-then-rename steps as the web
//! service, but waits for the fetch to finish.

use std::sync::Arc;

use vidfetch_core::{
    BackgroundFetchJob, CoreError, DownloadRequest, MediaFetcherPort, StorageLayout,
    safe_filename_from_title, title_or_default,
};
use vidfetch_download::{CompletedJob, WorkerDeps, run_job};

use crate::error::CliError;

/// Download `url` into `storage` and return the stored file.
pub async fn execute(
    url: &str,
    storage: &StorageLayout,
    fetcher: Arc<dyn MediaFetcherPort>,
) -> Result<CompletedJob, CliError> {
    let request = DownloadRequest::parse(url)?;
    storage.ensure().map_err(CoreError::from)?;

    let metadata = fetcher
        .resolve_metadata(request.url())
        .await
        .map_err(CoreError::from)?;

    let title = title_or_default(metadata.title.as_deref()).to_string();
    let stem = safe_filename_from_title(&title);
    let job = BackgroundFetchJob::new(
        request.into_url(),
        title.clone(),
        stem,
        metadata.container_extension(),
    );

    println!("Downloading \"{title}\" as {}", job.filename());
    tracing::debug!(target: "vidfetch.download", job_id = %job.id, url = %job.url, "Fetching");

    let deps = WorkerDeps {
        fetcher,
        storage: storage.clone(),
    };
    let done = run_job(&job, &deps).await.map_err(CoreError::from)?;

    println!("{}", done.path.display());
    Ok(done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use vidfetch_core::{FetchError, FetchRequest, MediaMetadata};

    struct MockFetcher;

    #[async_trait]
    impl MediaFetcherPort for MockFetcher {
        async fn resolve_metadata(&self, _url: &str) -> Result<MediaMetadata, FetchError> {
            Ok(MediaMetadata {
                ext: Some("webm".to_string()),
                ..MediaMetadata::with_title("Clip: One")
            })
        }

        async fn fetch(&self, request: &FetchRequest) -> Result<PathBuf, FetchError> {
            let path = request
                .output_dir
                .join(format!("{}.webm", request.file_stem));
            std::fs::write(&path, b"webm").map_err(|e| FetchError::from_io_error(&e))?;
            Ok(path)
        }
    }

    #[tokio::test]
    async fn downloads_into_storage_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageLayout::new(dir.path().join("videos"));

        let done = execute("https://youtu.be/abc", &storage, Arc::new(MockFetcher))
            .await
            .unwrap();

        assert_eq!(done.filename, "Clip__One.webm");
        assert_eq!(std::fs::read(&done.path).unwrap(), b"webm");
        assert!(!storage.job_staging_dir(&done.id).exists());
    }

    #[tokio::test]
    async fn invalid_url_is_a_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageLayout::new(dir.path());

        let err = execute("https://example.com/v", &storage, Arc::new(MockFetcher))
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Validation(ref m) if m == "Invalid YouTube URL"));
    }
}

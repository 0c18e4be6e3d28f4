//! Fetch worker pipeline.
//!
//! A job is fetched into its own staging directory under the storage root
//! and then renamed into place, so readers of the storage root only ever
//! see complete files. Two jobs producing the same name resolve
//! last-writer-wins.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use vidfetch_core::{
    BackgroundFetchJob, FetchError, FetchRequest, JobId, MediaFetcherPort, StorageLayout,
};

/// Dependencies for the fetch worker.
#[derive(Clone)]
pub struct WorkerDeps {
    /// Media fetcher that downloads into the staging directory.
    pub fetcher: Arc<dyn MediaFetcherPort>,
    /// Storage root and staging layout.
    pub storage: StorageLayout,
}

/// Result of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedJob {
    pub id: JobId,
    /// Final filename in the storage root.
    pub filename: String,
    /// Final path in the storage root.
    pub path: PathBuf,
}

/// Run a fetch job to completion.
///
/// 1. Creates the job's staging directory
/// 2. Fetches into it
/// 3. Renames the produced file to `{root}/{stem}.{ext}`
///
/// The staging directory is removed whatever the outcome.
pub async fn run_job(
    job: &BackgroundFetchJob,
    deps: &WorkerDeps,
) -> Result<CompletedJob, FetchError> {
    let staging = deps.storage.job_staging_dir(&job.id);
    tokio::fs::create_dir_all(&staging)
        .await
        .map_err(|e| FetchError::io("create_dir", e.to_string()))?;

    let result = fetch_and_commit(job, deps, &staging).await;
    remove_staging(&staging).await;
    result
}

async fn fetch_and_commit(
    job: &BackgroundFetchJob,
    deps: &WorkerDeps,
    staging: &Path,
) -> Result<CompletedJob, FetchError> {
    let request = FetchRequest {
        url: job.url.clone(),
        output_dir: staging.to_path_buf(),
        file_stem: job.file_stem.clone(),
    };
    let produced = deps.fetcher.fetch(&request).await?;

    if !produced.starts_with(staging) {
        return Err(FetchError::InvalidOutput(format!(
            "produced file outside staging directory: {}",
            produced.display()
        )));
    }

    let extension = committed_extension(&produced, &job.extension);
    if extension != job.extension {
        tracing::warn!(
            target: "vidfetch.download",
            job_id = %job.id,
            expected = %job.extension,
            actual = %extension,
            "Fetched container differs from the predicted one"
        );
    }

    let filename = format!("{}.{extension}", job.file_stem);
    let target = deps
        .storage
        .stored_path(&filename)
        .map_err(|e| FetchError::io("invalid_name", e.to_string()))?;

    tokio::fs::rename(&produced, &target)
        .await
        .map_err(|e| FetchError::io("rename", e.to_string()))?;

    Ok(CompletedJob {
        id: job.id,
        filename,
        path: target,
    })
}

/// Extension of the produced file when it is a plain token, else `fallback`.
fn committed_extension(produced: &Path, fallback: &str) -> String {
    produced
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map_or_else(|| fallback.to_string(), str::to_ascii_lowercase)
}

async fn remove_staging(staging: &Path) {
    match tokio::fs::remove_dir_all(staging).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(
                target: "vidfetch.download",
                dir = %staging.display(),
                error = %e,
                "Failed to remove staging directory"
            );
        }
    }
}

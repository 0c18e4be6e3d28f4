//! Download orchestrator.
//!
//! Validates the request, resolves a display title through the media
//! fetcher, derives a safe filename, hands the actual fetch to the
//! background job port and returns the predicted retrieval URL without
//! waiting for the fetch to finish.

use std::sync::Arc;

use crate::domain::{BackgroundFetchJob, DownloadRequest, DownloadTicket, JobId, JobRecord};
use crate::ports::{CoreError, FetchJobsPort, MediaFetcherPort};
use crate::utils::filename::{safe_filename_from_title, title_or_default};

/// Status message returned when a download has been accepted.
pub const DOWNLOAD_INITIATED: &str = "Download initiated";

/// Route prefix under which stored files are served.
const FILE_ROUTE: &str = "downloaded-video";

/// Route prefix under which job records are served.
const JOB_ROUTE: &str = "jobs";

/// Service for initiating downloads and tracking their jobs.
pub struct DownloadService {
    fetcher: Arc<dyn MediaFetcherPort>,
    jobs: Arc<dyn FetchJobsPort>,
    public_base_url: String,
}

impl DownloadService {
    /// Create a new download service.
    ///
    /// `public_base_url` is the externally reachable origin of the HTTP
    /// server (e.g. `http://localhost:8000`); a trailing slash is ignored.
    pub fn new(
        fetcher: Arc<dyn MediaFetcherPort>,
        jobs: Arc<dyn FetchJobsPort>,
        public_base_url: impl Into<String>,
    ) -> Self {
        let public_base_url = public_base_url.into().trim_end_matches('/').to_string();
        Self {
            fetcher,
            jobs,
            public_base_url,
        }
    }

    /// Validate `url`, resolve its title and schedule the background fetch.
    ///
    /// Returns as soon as the job is accepted. The returned `download_url`
    /// points at a file that will only exist once the job succeeds.
    pub async fn initiate_download(&self, url: &str) -> Result<DownloadTicket, CoreError> {
        let request = DownloadRequest::parse(url)?;

        let metadata = self
            .fetcher
            .resolve_metadata(request.url())
            .await
            .map_err(|e| {
                tracing::error!(
                    target: "vidfetch.download",
                    url = request.url(),
                    error = %e,
                    "Metadata resolution failed"
                );
                CoreError::from(e)
            })?;

        let title = title_or_default(metadata.title.as_deref()).to_string();
        let file_stem = safe_filename_from_title(&title);
        let extension = metadata.container_extension();

        let job = BackgroundFetchJob::new(request.into_url(), title, file_stem, extension);
        let job_id = job.id;
        let filename = job.filename();
        let url = job.url.clone();

        self.jobs.submit(job).await?;

        tracing::info!(
            target: "vidfetch.download",
            %job_id,
            url = %url,
            filename = %filename,
            "Download initiated"
        );

        Ok(DownloadTicket {
            message: DOWNLOAD_INITIATED.to_string(),
            download_url: self.file_url(&filename),
            status_url: self.job_url(&job_id),
            job_id,
            filename,
        })
    }

    /// Look up the status record of a job.
    pub async fn job_status(&self, id: &JobId) -> Result<JobRecord, CoreError> {
        self.jobs
            .get(id)
            .await
            .ok_or_else(|| CoreError::NotFound(format!("Job {id} not found")))
    }

    /// List every job known to this process.
    pub async fn list_jobs(&self) -> Vec<JobRecord> {
        self.jobs.list().await
    }

    fn file_url(&self, filename: &str) -> String {
        format!(
            "{}/{FILE_ROUTE}/{}",
            self.public_base_url,
            urlencoding::encode(filename)
        )
    }

    fn job_url(&self, id: &JobId) -> String {
        format!("{}/{JOB_ROUTE}/{id}", self.public_base_url)
    }
}

//! Background fetch port.

use async_trait::async_trait;

use crate::domain::{BackgroundFetchJob, JobId, JobRecord};
use crate::ports::CoreError;

/// Runs fetch jobs outside the request/response lifecycle and tracks
/// their status.
///
/// `submit` must return without waiting for the fetch to complete.
#[async_trait]
pub trait FetchJobsPort: Send + Sync {
    /// Accept a job for background execution.
    async fn submit(&self, job: BackgroundFetchJob) -> Result<(), CoreError>;

    /// Current record for a job, if known.
    async fn get(&self, id: &JobId) -> Option<JobRecord>;

    /// All known jobs, oldest first.
    async fn list(&self) -> Vec<JobRecord>;
}

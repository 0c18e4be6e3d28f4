//! Background fetch jobs and their status records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a background fetch job.
///
/// Returned to the caller when a download is initiated so the job's
/// outcome can be polled later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Generate a fresh random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A unit of background work: fetch `url` and store it as
/// `{file_stem}.{extension}` in the storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundFetchJob {
    /// Job identifier.
    pub id: JobId,
    /// Source URL (already validated).
    pub url: String,
    /// Display title used to derive the file stem.
    pub title: String,
    /// Sanitized file stem.
    pub file_stem: String,
    /// Expected container extension (without the dot).
    pub extension: String,
}

impl BackgroundFetchJob {
    /// Create a job with a fresh ID.
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        file_stem: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            id: JobId::new(),
            url: url.into(),
            title: title.into(),
            file_stem: file_stem.into(),
            extension: extension.into(),
        }
    }

    /// The filename the job is expected to produce.
    pub fn filename(&self) -> String {
        format!("{}.{}", self.file_stem, self.extension)
    }
}

/// Lifecycle state of a background fetch job.
///
/// Transitions: `Pending -> Running -> Succeeded | Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobStatus {
    /// Accepted, waiting for a worker.
    Pending,
    /// A worker is fetching the media.
    Running,
    /// The file is stored under `filename`.
    Succeeded {
        /// Final filename in the storage root.
        filename: String,
    },
    /// The fetch failed; nothing was stored.
    Failed {
        /// Failure description.
        error: String,
    },
}

impl JobStatus {
    /// Whether the job has reached a final state.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded { .. } | Self::Failed { .. })
    }
}

/// Status record of a job, as exposed to pollers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub url: String,
    pub title: String,
    /// Filename predicted when the job was accepted.
    pub filename: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    /// Create a pending record for a freshly accepted job.
    pub fn pending(job: &BackgroundFetchJob) -> Self {
        let now = Utc::now();
        Self {
            id: job.id,
            url: job.url.clone(),
            title: job.title.clone(),
            filename: job.filename(),
            status: JobStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move the record to a new status, bumping `updated_at`.
    pub fn transition(&mut self, status: JobStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// Result of initiating a download, returned before the fetch completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadTicket {
    pub message: String,
    /// Predicted retrieval URL for the stored file.
    pub download_url: String,
    /// URL of the job status resource.
    pub status_url: String,
    pub job_id: JobId,
    /// Predicted filename in the storage root.
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_id_roundtrips_through_display() {
        let id = JobId::new();
        let parsed: JobId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<JobId>().is_err());
    }

    #[test]
    fn job_filename_joins_stem_and_extension() {
        let job = BackgroundFetchJob::new("https://youtu.be/x", "T", "My_Video", "webm");
        assert_eq!(job.filename(), "My_Video.webm");
    }

    #[test]
    fn record_starts_pending_and_transitions() {
        let job = BackgroundFetchJob::new("https://youtu.be/x", "T", "T", "mp4");
        let mut record = JobRecord::pending(&job);
        assert_eq!(record.status, JobStatus::Pending);
        assert!(!record.status.is_terminal());

        record.transition(JobStatus::Running);
        assert!(!record.status.is_terminal());

        record.transition(JobStatus::Failed {
            error: "boom".to_string(),
        });
        assert!(record.status.is_terminal());
        assert!(record.updated_at >= record.created_at);
    }

    #[test]
    fn status_serializes_with_state_tag() {
        let json = serde_json::to_value(JobStatus::Succeeded {
            filename: "a.mp4".to_string(),
        })
        .unwrap();
        assert_eq!(json["state"], "succeeded");
        assert_eq!(json["filename"], "a.mp4");

        let pending = serde_json::to_value(JobStatus::Pending).unwrap();
        assert_eq!(pending["state"], "pending");
    }
}

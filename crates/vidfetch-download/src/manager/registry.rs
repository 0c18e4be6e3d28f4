//! In-memory job status store.
//!
//! Records are kept for the life of the process and are never evicted, so
//! memory grows with the number of accepted jobs. A restart clears them.

use indexmap::IndexMap;
use tokio::sync::RwLock;

use vidfetch_core::{JobId, JobRecord, JobStatus};

/// Status records keyed by job ID, in submission order.
#[derive(Default)]
pub struct JobRegistry {
    records: RwLock<IndexMap<JobId, JobRecord>>,
}

impl JobRegistry {
    pub async fn insert(&self, record: JobRecord) {
        self.records.write().await.insert(record.id, record);
    }

    pub async fn remove(&self, id: &JobId) {
        self.records.write().await.shift_remove(id);
    }

    /// Apply a status transition. Terminal records are never changed.
    pub async fn transition(&self, id: &JobId, status: JobStatus) {
        let mut records = self.records.write().await;
        match records.get_mut(id) {
            Some(record) if !record.status.is_terminal() => record.transition(status),
            Some(_) => {}
            None => {
                tracing::warn!(target: "vidfetch.download", job_id = %id, "Status update for unknown job");
            }
        }
    }

    pub async fn get(&self, id: &JobId) -> Option<JobRecord> {
        self.records.read().await.get(id).cloned()
    }

    pub async fn list(&self) -> Vec<JobRecord> {
        self.records.read().await.values().cloned().collect()
    }
}

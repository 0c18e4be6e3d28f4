//! Background fetch manager.
//!
//! # Architecture
//!
//! - **Manager**: accepts jobs, records them as pending and queues them
//! - **Workers**: a fixed number of tasks pulling from one shared queue,
//!   each running [`run_job`] and writing the outcome to the registry
//! - **Registry**: in-memory status records, readable while jobs run
//!
//! A failed job is logged and recorded; it never stops its worker.

mod registry;
mod worker;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use vidfetch_core::{BackgroundFetchJob, CoreError, FetchJobsPort, JobId, JobRecord, JobStatus};

use registry::JobRegistry;

pub use worker::{CompletedJob, WorkerDeps, run_job};

/// Number of concurrent fetches when not configured.
pub const DEFAULT_WORKERS: usize = 2;

type SharedReceiver = Arc<Mutex<mpsc::UnboundedReceiver<BackgroundFetchJob>>>;

/// Worker pool plus job status store.
///
/// Adapters should hold this as `Arc<dyn FetchJobsPort>`.
pub struct FetchManager {
    queue: mpsc::UnboundedSender<BackgroundFetchJob>,
    registry: Arc<JobRegistry>,
}

impl FetchManager {
    /// Start `workers` worker tasks (at least one) on the current runtime.
    pub fn spawn(deps: WorkerDeps, workers: usize) -> Self {
        let (queue, rx) = mpsc::unbounded_channel();
        let rx: SharedReceiver = Arc::new(Mutex::new(rx));
        let registry = Arc::new(JobRegistry::default());

        let workers = workers.max(1);
        for worker_id in 0..workers {
            tokio::spawn(worker_loop(
                worker_id,
                Arc::clone(&rx),
                deps.clone(),
                Arc::clone(&registry),
            ));
        }

        tracing::debug!(target: "vidfetch.download", workers, "Fetch workers started");

        Self { queue, registry }
    }
}

async fn worker_loop(
    worker_id: usize,
    rx: SharedReceiver,
    deps: WorkerDeps,
    registry: Arc<JobRegistry>,
) {
    loop {
        // Hold the lock only while waiting for the next job.
        let next = rx.lock().await.recv().await;
        let Some(job) = next else {
            break;
        };
        process(worker_id, &job, &deps, &registry).await;
    }
    tracing::debug!(target: "vidfetch.download", worker_id, "Fetch worker stopped");
}

async fn process(
    worker_id: usize,
    job: &BackgroundFetchJob,
    deps: &WorkerDeps,
    registry: &JobRegistry,
) {
    registry.transition(&job.id, JobStatus::Running).await;
    tracing::info!(
        target: "vidfetch.download",
        job_id = %job.id,
        worker_id,
        url = %job.url,
        "Fetch started"
    );

    match run_job(job, deps).await {
        Ok(done) => {
            tracing::info!(
                target: "vidfetch.download",
                job_id = %job.id,
                path = %done.path.display(),
                "Fetch completed"
            );
            registry
                .transition(
                    &job.id,
                    JobStatus::Succeeded {
                        filename: done.filename,
                    },
                )
                .await;
        }
        Err(e) => {
            tracing::error!(
                target: "vidfetch.download",
                job_id = %job.id,
                url = %job.url,
                error = %e,
                "Fetch failed"
            );
            registry
                .transition(&job.id, JobStatus::Failed { error: e.to_string() })
                .await;
        }
    }
}

#[async_trait]
impl FetchJobsPort for FetchManager {
    async fn submit(&self, job: BackgroundFetchJob) -> Result<(), CoreError> {
        let id = job.id;
        self.registry.insert(JobRecord::pending(&job)).await;

        if self.queue.send(job).is_err() {
            self.registry.remove(&id).await;
            return Err(CoreError::Internal(
                "Fetch workers are not running".to_string(),
            ));
        }
        Ok(())
    }

    async fn get(&self, id: &JobId) -> Option<JobRecord> {
        self.registry.get(id).await
    }

    async fn list(&self) -> Vec<JobRecord> {
        self.registry.list().await
    }
}

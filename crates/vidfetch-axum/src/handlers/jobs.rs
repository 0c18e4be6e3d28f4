//! Job status handlers.

use axum::Json;
use axum::extract::{Path, State};
use vidfetch_core::{JobId, JobRecord};

use crate::error::HttpError;
use crate::state::AppState;

/// List all jobs in submission order.
pub async fn list(State(state): State<AppState>) -> Json<Vec<JobRecord>> {
    Json(state.downloads.list_jobs().await)
}

/// Get a single job's status record.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobRecord>, HttpError> {
    let id: JobId = id
        .parse()
        .map_err(|_| HttpError::BadRequest(format!("Invalid job id: {id}")))?;
    Ok(Json(state.downloads.job_status(&id).await?))
}

//! Download initiation handler.

use axum::Json;
use axum::extract::{Form, FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use serde::Deserialize;
use vidfetch_core::DownloadTicket;

use crate::error::HttpError;
use crate::state::AppState;

/// Form body of `POST /download`.
#[derive(Debug, Default, Deserialize)]
pub struct DownloadForm {
    #[serde(default)]
    pub url: Option<String>,
}

/// Extracts the `url` field from either an urlencoded or a multipart form.
///
/// An unreadable or missing body yields `url: None`; the service reports
/// the missing URL.
#[derive(Debug, Default)]
pub struct UrlField(pub Option<String>);

impl<S> FromRequest<S> for UrlField
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| HttpError::BadRequest(e.body_text()))?;
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| HttpError::BadRequest(e.body_text()))?
            {
                if field.name() == Some("url") {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| HttpError::BadRequest(e.body_text()))?;
                    return Ok(Self(Some(text)));
                }
            }
            return Ok(Self(None));
        }

        match Form::<DownloadForm>::from_request(req, state).await {
            Ok(Form(form)) => Ok(Self(form.url)),
            Err(rejection) => {
                tracing::debug!(target: "vidfetch.http", "Unreadable download form: {}", rejection);
                Ok(Self(None))
            }
        }
    }
}

/// Validate the URL, resolve its title and schedule the background fetch.
pub async fn initiate(
    State(state): State<AppState>,
    UrlField(url): UrlField,
) -> Result<Json<DownloadTicket>, HttpError> {
    let ticket = state
        .downloads
        .initiate_download(url.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(ticket))
}

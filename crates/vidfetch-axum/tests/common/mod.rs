//! Shared fixtures for vidfetch-axum integration tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use tower::ServiceExt;

use vidfetch_axum::{CorsConfig, ServerConfig, bootstrap_with_fetcher, create_router};
use vidfetch_core::{FetchError, FetchRequest, MediaFetcherPort, MediaMetadata};

/// Bytes written by [`FakeFetcher`] for every fetched file.
pub const FAKE_MEDIA: &[u8] = b"fake video bytes";

/// Title reported by [`FakeFetcher`].
pub const FAKE_TITLE: &str = "My Video: Part 1";

/// Media fetcher that never leaves the process.
///
/// URLs containing `broken` fail metadata resolution; every other URL
/// resolves to [`FAKE_TITLE`] and fetches as an `.mp4` holding
/// [`FAKE_MEDIA`].
pub struct FakeFetcher;

#[async_trait]
impl MediaFetcherPort for FakeFetcher {
    async fn resolve_metadata(&self, url: &str) -> Result<MediaMetadata, FetchError> {
        if url.contains("broken") {
            return Err(FetchError::ProcessFailed(
                "ERROR: [youtube] broken: Video unavailable".to_string(),
            ));
        }
        Ok(MediaMetadata {
            ext: Some("mp4".to_string()),
            ..MediaMetadata::with_title(FAKE_TITLE)
        })
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<PathBuf, FetchError> {
        let path = request
            .output_dir
            .join(format!("{}.mp4", request.file_stem));
        tokio::fs::write(&path, FAKE_MEDIA)
            .await
            .map_err(|e| FetchError::from_io_error(&e))?;
        Ok(path)
    }
}

/// Router over a fresh storage root at `root`.
pub async fn test_app(root: &Path, cors: &CorsConfig) -> Router {
    let config = ServerConfig {
        storage_dir: Some(root.to_path_buf()),
        workers: 1,
        cors: cors.clone(),
        ..ServerConfig::default()
    };
    let ctx = bootstrap_with_fetcher(&config, Arc::new(FakeFetcher))
        .await
        .expect("bootstrap should succeed");
    create_router(ctx, cors)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_form(app: &Router, body: &str) -> Response<Body> {
    let request = Request::post("/download")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

use std::path::PathBuf;

use admissions_api::{build_app, ApiConfig};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

pub fn static_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../static")
}

pub fn test_app() -> Router {
    build_app(&ApiConfig::default().with_static_root(static_root()))
}

pub fn chat_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(body.into())
        .expect("chat request should build")
}

/// Sends one request and returns the status with the body as text.
pub async fn send(app: Router, request: Request<Body>) -> anyhow::Result<(StatusCode, String)> {
    let response = app.oneshot(request).await?;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, String::from_utf8(body.to_vec())?))
}

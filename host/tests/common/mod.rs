//! Shared fixtures for host scenario tests.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::Query,
    http::{header, HeaderMap, StatusCode},
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use scenario_host::Host;
use tracing_subscriber::EnvFilter;

pub const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D];

/// Install a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scenario_core=debug,scenario_host=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

pub fn host() -> Host {
    init_tracing();
    Host::new(app())
}

pub fn app() -> Router {
    Router::new()
        .route("/api/test", get(|| async { "success" }))
        .route("/api/data", post(data))
        .route("/api/update", put(|| async { "updated" }))
        .route("/api/remove", delete(|| async { "deleted" }))
        .route("/api/patch", patch(|| async { "patched" }))
        .route("/api/head", get(|| async { StatusCode::OK }))
        .route("/api/search", get(search))
        .route("/api/headers", get(custom_header))
        .route("/api/multiheader", get(multiple_headers))
        .route("/api/secure", get(secure))
        .route("/api/json", post(json))
        .route("/api/binary", post(binary))
        .route("/api/relative", get(|| async { "relative path" }))
        .route("/api/content-headers", post(content_headers))
        .route("/api/echo", post(echo))
}

fn header_is(headers: &HeaderMap, name: &str, expected: &str) -> bool {
    headers.get(name).and_then(|v| v.to_str().ok()) == Some(expected)
}

async fn data(body: Bytes) -> Result<&'static str, StatusCode> {
    (body == "test data")
        .then_some("received")
        .ok_or(StatusCode::BAD_REQUEST)
}

async fn search(Query(query): Query<HashMap<String, String>>) -> Result<&'static str, StatusCode> {
    (query.get("q").map(String::as_str) == Some("test"))
        .then_some("found")
        .ok_or(StatusCode::BAD_REQUEST)
}

async fn custom_header(headers: HeaderMap) -> Result<&'static str, StatusCode> {
    header_is(&headers, "x-custom-header", "custom-value")
        .then_some("ok")
        .ok_or(StatusCode::BAD_REQUEST)
}

async fn multiple_headers(headers: HeaderMap) -> Result<&'static str, StatusCode> {
    (header_is(&headers, "x-custom-1", "value1") && header_is(&headers, "x-custom-2", "value2"))
        .then_some("multi")
        .ok_or(StatusCode::BAD_REQUEST)
}

async fn secure(headers: HeaderMap) -> Result<&'static str, StatusCode> {
    header_is(&headers, header::AUTHORIZATION.as_str(), "Bearer test-token-123")
        .then_some("authorized")
        .ok_or(StatusCode::UNAUTHORIZED)
}

async fn json(headers: HeaderMap, body: Bytes) -> Result<&'static str, StatusCode> {
    (header_is(&headers, "content-type", "application/json; charset=utf-8")
        && body == r#"{"name":"test"}"#)
        .then_some("processed")
        .ok_or(StatusCode::BAD_REQUEST)
}

async fn binary(headers: HeaderMap, body: Bytes) -> Result<&'static str, StatusCode> {
    (header_is(&headers, "content-type", "image/png") && body == PNG_SIGNATURE)
        .then_some("uploaded")
        .ok_or(StatusCode::BAD_REQUEST)
}

async fn content_headers(headers: HeaderMap) -> Result<&'static str, StatusCode> {
    header_is(&headers, "content-language", "en-US")
        .then_some("ok")
        .ok_or(StatusCode::BAD_REQUEST)
}

async fn echo(Json(value): Json<serde_json::Value>) -> Json<serde_json::Value> {
    Json(value)
}

// Common test utilities

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use job_scraper::{JobRegistry, MemoryStore, PostingStore};
use serde_json::Value;
use server_core::{
    server::{build_app, AppState},
    Config,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Default configuration with a short poll budget.
pub fn test_config() -> Config {
    let mut config = Config::from_lookup(|_| None).expect("default config");
    config.poll_interval = Duration::from_millis(10);
    config.poll_budget = Duration::from_millis(50);
    config
}

/// Router over the given registry and store.
pub fn test_app(registry: Arc<dyn JobRegistry>, store: Arc<dyn PostingStore>) -> Router {
    let config = test_config();
    build_app(AppState::new(store, registry, &config), &config.allowed_origins)
}

/// Router over the given registry and a fresh in-memory store.
pub fn app_with_registry(registry: Arc<dyn JobRegistry>) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (test_app(registry, store.clone()), store)
}

/// Send one request and decode the JSON body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body read failed")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

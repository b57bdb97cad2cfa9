//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use job_scraper::{Dispatcher, JobRegistry, PostingStore, Source, StatusPoller};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::routes::{health_handler, jobs_handler, scrape_handler, scrape_status_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PostingStore>,
    pub dispatcher: Arc<Dispatcher>,
    pub poller: Arc<StatusPoller>,
    /// Sources dispatched when a request names none.
    pub sources: Vec<Source>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn PostingStore>,
        registry: Arc<dyn JobRegistry>,
        config: &Config,
    ) -> Self {
        Self {
            store,
            dispatcher: Arc::new(Dispatcher::new(registry.clone(), config.dispatch_config())),
            poller: Arc::new(StatusPoller::new(registry, config.poll_config())),
            sources: config.sources.clone(),
        }
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    // Poll sessions run up to their budget; leave headroom over it.
    let request_timeout = state.poller.config().budget + Duration::from_secs(20);

    Router::new()
        .route("/health", get(health_handler))
        .route("/tasks/scrape", post(scrape_handler))
        .route("/tasks/scrape/status/:job_id", get(scrape_status_handler))
        .route("/jobs/:user_id", get(jobs_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}

/// CORS: explicit origins when configured, any origin otherwise (development).
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(origins)
    }
}

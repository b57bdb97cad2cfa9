//! Crawl dispatch and status routes.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use job_scraper::{DispatchOutcome, PollOutcome, Source};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;
use crate::server::routes::error_response;

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    #[serde(rename = "jobRole")]
    pub job_role: String,
    pub location: String,
    pub user_id: String,
    /// Source ids to crawl; the configured default set when omitted.
    #[serde(default)]
    pub sources: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub results: Vec<DispatchOutcome>,
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub project: Option<String>,
}

/// `POST /tasks/scrape`: schedule a crawl of every requested source.
///
/// Per-source failures are reported in `results`, never as an error status.
pub async fn scrape_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<ScrapeRequest>,
) -> Response {
    let job_role = request.job_role.trim();
    let location = request.location.trim();
    let user_id = request.user_id.trim();

    if job_role.is_empty() || location.is_empty() || user_id.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "jobRole, location and user_id must not be blank",
        )
        .into_response();
    }

    let sources = match &request.sources {
        None => state.sources.clone(),
        Some(ids) => match ids.iter().map(|id| id.parse::<Source>()).collect::<Result<Vec<_>, _>>() {
            Ok(sources) if !sources.is_empty() => sources,
            Ok(_) => {
                return error_response(StatusCode::BAD_REQUEST, "sources must not be empty")
                    .into_response()
            }
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        },
    };

    let results = state
        .dispatcher
        .dispatch(&sources, job_role, location, user_id)
        .await;

    (StatusCode::OK, Json(ScrapeResponse { results })).into_response()
}

/// `GET /tasks/scrape/status/:job_id`: locate a crawl job by id.
pub async fn scrape_status_handler(
    Extension(state): Extension<AppState>,
    Path(job_id): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Json<PollOutcome> {
    let outcome = match query.project.as_deref().map(str::trim) {
        Some(project) if !project.is_empty() => state.poller.poll_project(project, &job_id).await,
        _ => state.poller.poll(&job_id).await,
    };
    Json(outcome)
}

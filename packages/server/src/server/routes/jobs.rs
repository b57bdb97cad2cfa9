use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use job_scraper::UserJobsDocument;

use crate::server::app::AppState;
use crate::server::routes::{error_response, ApiResponse};

/// `GET /jobs/:user_id`: the user's stored postings grouped by source.
///
/// A user with nothing stored yet gets an empty document, not a 404.
pub async fn jobs_handler(
    Extension(state): Extension<AppState>,
    Path(user_id): Path<String>,
) -> Response {
    match state.store.user_jobs(&user_id).await {
        Ok(document) => {
            let document = document.unwrap_or_else(|| UserJobsDocument::new(user_id.as_str()));
            ApiResponse::ok("Jobs retrieved successfully", document).into_response()
        }
        Err(e) => {
            tracing::error!(user_id = %user_id, error = %e, "Failed to load user jobs");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to load jobs").into_response()
        }
    }
}

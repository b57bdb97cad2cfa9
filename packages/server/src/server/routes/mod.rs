// HTTP routes
pub mod health;
pub mod jobs;
pub mod scrape;

pub use health::*;
pub use jobs::*;
pub use scrape::*;

use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Response envelope used by the user-facing routes.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> (StatusCode, Json<Self>) {
        Self::respond(StatusCode::OK, message, Some(data))
    }

    pub fn respond(
        status: StatusCode,
        message: impl Into<String>,
        data: Option<T>,
    ) -> (StatusCode, Json<Self>) {
        (
            status,
            Json(Self {
                status: status.as_u16(),
                message: message.into(),
                success: !(status.is_client_error() || status.is_server_error()),
                data,
            }),
        )
    }
}

/// An error body without data.
pub fn error_response(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ApiResponse<()>>) {
    ApiResponse::respond(status, message, None)
}

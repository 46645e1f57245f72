use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

/// Failure surfaced by the HTTP layer. The forecasting functions themselves
/// never fail; only request validation and persistence do.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn storage(err: impl std::error::Error) -> Self {
        error!("failed to store observations: {err}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "failed to store observations".to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::storage(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::storage(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            warn!(status = %self.status, "rejected request: {}", self.message);
        }
        (self.status, Json(ErrorBody { error: &self.message })).into_response()
    }
}

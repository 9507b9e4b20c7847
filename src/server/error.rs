use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to HTTP clients
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("bad id")]
    BadId,

    #[error("hltv failed: {detail}")]
    FetchFailed { detail: String },
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadId => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "bad id",
                    detail: None,
                },
            ),
            ApiError::FetchFailed { detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "hltv failed",
                    detail: Some(detail),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

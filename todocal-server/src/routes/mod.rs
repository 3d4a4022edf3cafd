pub mod health;
pub mod prioritize;
pub mod todos;

use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::prioritizer::PrioritizeError;

/// Body of every HTTP fault
#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// An error that becomes an HTTP fault.
///
/// Calendar failures are not faults; handlers render them in-band.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { detail: self.detail })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

/// JSON body extractor whose rejections render as `{"detail": ...}`
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<PrioritizeError> for ApiError {
    fn from(err: PrioritizeError) -> Self {
        ApiError {
            status: err.status_code(),
            detail: err.to_string(),
        }
    }
}

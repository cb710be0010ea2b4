use crate::Error;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// A quickcrud error rendered as `{"error": category, "message": text}`.
#[derive(Debug)]
pub(crate) struct ApiError(pub(crate) Error);

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    fn classify(&self) -> (StatusCode, &'static str) {
        let err = &self.0;

        if err.is_unknown_field() {
            (StatusCode::BAD_REQUEST, "unknown_field")
        } else if err.is_unsupported_operator() {
            (StatusCode::BAD_REQUEST, "unsupported_operator")
        } else if err.is_invalid_request() {
            (StatusCode::BAD_REQUEST, "invalid_request")
        } else if err.is_type_coercion() {
            (StatusCode::UNPROCESSABLE_ENTITY, "type_coercion")
        } else if err.is_validation() {
            (StatusCode::UNPROCESSABLE_ENTITY, "validation")
        } else if err.is_record_not_found() {
            (StatusCode::NOT_FOUND, "not_found")
        } else if err.is_conflict() {
            (StatusCode::CONFLICT, "conflict")
        } else {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal")
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.classify();

        if status.is_server_error() {
            tracing::warn!(err = %self.0, "request failed");
        } else {
            tracing::debug!(err = %self.0, %status, "request rejected");
        }

        let body = ErrorBody {
            error,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Message shown to the user for any failed store request.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("Insert failed: {0}")]
    Insert(#[source] StoreError),

    #[error("Fetch failed: {0}")]
    Fetch(#[source] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::SubmissionInFlight => (
                StatusCode::CONFLICT,
                "SUBMISSION_IN_FLIGHT",
                "A prompt is already being saved".to_string(),
            ),
            // Store failures are logged where they happen; the client only gets the generic text.
            AppError::Insert(_) => (
                StatusCode::BAD_GATEWAY,
                "INSERT_FAILED",
                GENERIC_FAILURE.to_string(),
            ),
            AppError::Fetch(_) => (
                StatusCode::BAD_GATEWAY,
                "FETCH_FAILED",
                GENERIC_FAILURE.to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::SubmissionInFlight, StatusCode::CONFLICT),
            (
                AppError::Insert(StoreError::EmptyInsert),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::Fetch(StoreError::Unavailable("down".into())),
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_display_keeps_store_cause() {
        let err = AppError::Fetch(StoreError::Api {
            status: 401,
            message: "JWT expired".into(),
        });
        assert_eq!(
            err.to_string(),
            "Fetch failed: API error (status 401): JWT expired"
        );
    }
}

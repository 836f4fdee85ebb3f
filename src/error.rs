use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Single user-facing message for anything that went wrong on the provider
/// side. Provider internals stay in the logs.
pub const PROVIDER_USER_MESSAGE: &str =
    "Unable to fetch live travel data. Please try a different location.";

#[derive(Debug, Error)]
pub enum PlanError {
    /// Malformed or out-of-range trip request. Blocks the outbound call
    /// entirely and is safe to surface verbatim.
    #[error("invalid trip request: {0}")]
    Validation(String),

    /// Network failure, non-2xx response, schema mismatch or JSON decode
    /// failure from the generation provider. Not retried.
    #[error("provider error: {0}")]
    Provider(String),

    /// Missing or unusable credential. Presented to the user like a provider
    /// failure but logged as its own category.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl IntoResponse for PlanError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            PlanError::Validation(reason) => {
                (StatusCode::UNPROCESSABLE_ENTITY, reason.clone())
            }
            PlanError::Provider(detail) => {
                error!("provider failure: {detail}");
                (StatusCode::BAD_GATEWAY, PROVIDER_USER_MESSAGE.to_string())
            }
            PlanError::Configuration(detail) => {
                error!("configuration failure: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    PROVIDER_USER_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

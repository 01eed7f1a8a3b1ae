//! Request-level error handling.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::sanity::SanityError;

/// Errors surfaced from request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// The Content Lake call behind the request failed.
    #[error("Content Lake error: {0}")]
    Sanity(#[from] SanityError),

    /// The request itself was malformed.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Sanity(e) => {
                tracing::error!(error = %e, "upstream store failure");
                sentry::capture_error(&self);
                (StatusCode::BAD_GATEWAY, "Order store is unavailable".to_string())
            }
            Self::BadRequest(reason) => {
                tracing::warn!(reason, "rejected request");
                (StatusCode::BAD_REQUEST, reason.clone())
            }
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_maps_to_400() {
        let response = AppError::BadRequest("unknown status field".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_failure_maps_to_502() {
        let response = AppError::Sanity(SanityError::Parse("bad json".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}

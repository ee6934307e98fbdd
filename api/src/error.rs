use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use shared::FetchError;
use thiserror::Error;

/// Unified error type for API responses.
///
/// Every failure renders as `{"error": <code>, "message": <human string>}`.
/// Rate limits get their own status so clients can back off or switch to
/// demo mode; the remaining upstream classifications collapse to 500 with
/// the classified message preserved.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing required query parameter: pair")]
    MissingPair,

    #[error("invalid currency pair {0:?}: expected a 6-letter code such as EURUSD")]
    InvalidPair(String),

    #[error(transparent)]
    Upstream(#[from] FetchError),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingPair => "MISSING_PAIR",
            Self::InvalidPair(_) => "INVALID_PAIR",
            Self::Upstream(FetchError::RateLimit(_)) => "API_LIMIT_REACHED",
            Self::Upstream(_) => "UPSTREAM_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::MissingPair | Self::InvalidPair(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(FetchError::RateLimit(_)) => StatusCode::TOO_MANY_REQUESTS,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Upstream(FetchError::RateLimit(_)) => {
                "API call limit reached, try again later or enable demo mode".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.code(), "message": self.message() });
        (self.status(), Json(body)).into_response()
    }
}

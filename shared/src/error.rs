use thiserror::Error;

/// Classification of upstream fetch failures.
///
/// `RateLimit` is kept distinct so the API layer can answer it differently
/// (suggest waiting or demo mode); the remaining variants collapse to a
/// generic server error at the HTTP boundary but stay distinct for
/// diagnostics.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure or non-2xx upstream status.
    #[error("upstream request failed: {0}")]
    Transport(String),

    /// The provider declared its rate limit reached.
    #[error("provider rate limit reached: {0}")]
    RateLimit(String),

    /// The provider declared a generic error.
    #[error("provider error: {0}")]
    Provider(String),

    /// The response carried no time-series data.
    #[error("no time-series data in provider response: {0}")]
    NoData(String),

    /// The response payload could not be decoded.
    #[error("failed to parse provider response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Parse(e.to_string())
    }
}

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::v1::response::ApiResponse;

#[derive(Error, Debug)]
pub enum CampusError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] libsql::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Generation failed after {attempts} attempt(s): {source}")]
    Generation {
        attempts: u32,
        #[source]
        source: Box<CampusError>,
    },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    #[error("LLM rate limit exceeded, retry after {retry_after:?} seconds")]
    LlmRateLimit { retry_after: Option<u64> },
}

impl CampusError {
    /// Whether a failed generation attempt may be retried.
    ///
    /// Only configuration and input problems are permanent; every backend
    /// failure (transport, API error, malformed or empty output) is retried.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            CampusError::Validation(_) | CampusError::LlmUnavailable(_)
        )
    }
}

impl From<validator::ValidationErrors> for CampusError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CampusError::Validation(errors.to_string())
    }
}

/// Errors leaving a handler or extractor are rendered in the v1 envelope.
impl IntoResponse for CampusError {
    fn into_response(self) -> Response {
        ApiResponse::<()>::from(self).into_response()
    }
}

pub type Result<T> = std::result::Result<T, CampusError>;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::AskResult;

/// Request body for `POST /v1/ask`.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    /// The question to answer. Must not be blank.
    #[validate(length(max = 4000, message = "Query must be at most 4000 characters"))]
    pub query: String,
}

/// Response for `POST /v1/ask`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    /// The question as answered (trimmed).
    pub question: String,
    /// Markdown answer.
    pub answer: String,
    /// Alternative phrasings of the question.
    pub suggestions: Vec<String>,
    /// History entry id; `null` if the question could not be saved.
    pub question_id: Option<String>,
}

impl From<AskResult> for AskResponse {
    fn from(result: AskResult) -> Self {
        Self {
            question: result.question,
            answer: result.answer,
            suggestions: result.suggestions,
            question_id: result.question_id,
        }
    }
}

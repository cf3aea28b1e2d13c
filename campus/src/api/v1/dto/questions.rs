use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Question;

/// Query parameters for `GET /v1/questions`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListQuestionsQuery {
    /// Maximum entries to return (server default when absent, max 100).
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.id,
            question: question.question,
            answer: question.answer,
            created_at: question.created_at,
        }
    }
}

/// Response for `GET /v1/questions`, newest first.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListQuestionsResponse {
    pub questions: Vec<QuestionResponse>,
}

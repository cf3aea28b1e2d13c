//! v1 question history.

use axum::extract::State;

use crate::api::extractors::{AppQuery, CurrentSession};
use crate::api::v1::dto::{ListQuestionsQuery, ListQuestionsResponse, QuestionResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ResponseMeta};
use crate::api::AppState;

/// `GET /api/v1/questions`
#[utoipa::path(
    get,
    path = "/api/v1/questions",
    tag = "questions",
    operation_id = "questions.list",
    params(
        ListQuestionsQuery,
        ("X-User-Id" = String, Header, description = "Session user id"),
    ),
    responses(
        (status = 200, description = "Question history, newest first", body = ListQuestionsResponse),
        (status = 400, description = "Malformed query string", body = ApiError),
        (status = 401, description = "Missing API key or unknown user", body = ApiError),
    )
)]
pub async fn list_questions(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    AppQuery(query): AppQuery<ListQuestionsQuery>,
) -> ApiResponse<ListQuestionsResponse> {
    let questions = match state.ask.history(&session, query.limit).await {
        Ok(questions) => questions,
        Err(e) => return e.into(),
    };

    let total = questions.len();
    ApiResponse::success_with_meta(
        ListQuestionsResponse {
            questions: questions.into_iter().map(QuestionResponse::from).collect(),
        },
        ResponseMeta::total(total),
    )
}

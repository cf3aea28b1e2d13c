//! v1 question answering.

use axum::extract::State;
use validator::Validate;

use crate::api::extractors::{AppJson, CurrentSession};
use crate::api::v1::dto::{AskRequest, AskResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::error::CampusError;

/// `POST /api/v1/ask`
///
/// Generates the answer and the "did you mean" suggestions concurrently,
/// retrying each under the configured policy, then records the question in
/// the session user's history.
#[utoipa::path(
    post,
    path = "/api/v1/ask",
    tag = "ask",
    operation_id = "ask",
    request_body = AskRequest,
    params(("X-User-Id" = String, Header, description = "Session user id")),
    responses(
        (status = 200, description = "Question answered", body = AskResponse),
        (status = 400, description = "Blank or oversized query", body = ApiError),
        (status = 401, description = "Missing API key or unknown user", body = ApiError),
        (status = 501, description = "No language model configured", body = ApiError),
        (status = 502, description = "Generation failed after retries", body = ApiError),
    )
)]
pub async fn ask(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    AppJson(req): AppJson<AskRequest>,
) -> ApiResponse<AskResponse> {
    if let Err(e) = req.validate() {
        return CampusError::from(e).into();
    }

    if req.query.trim().is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Query cannot be empty");
    }

    match state.ask.ask(&session, &req.query).await {
        Ok(result) => ApiResponse::success(AskResponse::from(result)),
        Err(e) => e.into(),
    }
}

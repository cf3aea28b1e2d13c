use axum::extract::State;

use crate::api::extractors::CurrentSession;
use crate::api::v1::dto::{CollaboratorResponse, ListCollaboratorsResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ResponseMeta};
use crate::api::AppState;

/// `GET /api/v1/collaborators`
#[utoipa::path(
    get,
    path = "/api/v1/collaborators",
    tag = "collaborators",
    operation_id = "collaborators.list",
    params(("X-User-Id" = String, Header, description = "Session user id")),
    responses(
        (status = 200, description = "Peers sharing an interest", body = ListCollaboratorsResponse),
        (status = 401, description = "Missing API key or unknown user", body = ApiError),
    )
)]
pub async fn list_collaborators(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> ApiResponse<ListCollaboratorsResponse> {
    let peers = match state.recommendations.collaborators(&session).await {
        Ok(peers) => peers,
        Err(e) => return e.into(),
    };

    let total = peers.len();
    let collaborators = peers
        .into_iter()
        .map(|peer| CollaboratorResponse::new(peer, &session.user.interest_tags))
        .collect();

    ApiResponse::success_with_meta(
        ListCollaboratorsResponse { collaborators },
        ResponseMeta::total(total),
    )
}

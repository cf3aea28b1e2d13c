//! v1 profile handlers.

use axum::extract::State;
use validator::Validate;

use crate::api::extractors::{AppJson, CurrentSession};
use crate::api::v1::dto::{ProfileResponse, UpdateInterestsRequest};
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::api::AppState;
use crate::error::CampusError;

/// `GET /api/v1/profile`
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    tag = "profile",
    operation_id = "profile.get",
    params(("X-User-Id" = String, Header, description = "Session user id")),
    responses(
        (status = 200, description = "Session user profile", body = ProfileResponse),
        (status = 401, description = "Missing API key or unknown user", body = ApiError),
    )
)]
pub async fn get_profile(CurrentSession(session): CurrentSession) -> ApiResponse<ProfileResponse> {
    ApiResponse::success(ProfileResponse::from(session.user))
}

/// `PUT /api/v1/profile/interests`
#[utoipa::path(
    put,
    path = "/api/v1/profile/interests",
    tag = "profile",
    operation_id = "profile.updateInterests",
    request_body = UpdateInterestsRequest,
    params(("X-User-Id" = String, Header, description = "Session user id")),
    responses(
        (status = 200, description = "Interests replaced", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn update_interests(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    AppJson(req): AppJson<UpdateInterestsRequest>,
) -> ApiResponse<ProfileResponse> {
    if let Err(e) = req.validate() {
        return CampusError::from(e).into();
    }

    match state.profile.update_interests(&session, &req.interests).await {
        Ok(user) => ApiResponse::success(ProfileResponse::from(user)),
        Err(e) => e.into(),
    }
}

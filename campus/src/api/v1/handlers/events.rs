//! v1 event catalog, recommendations and bookmarks.

use axum::extract::{Path, State};

use crate::api::extractors::CurrentSession;
use crate::api::v1::dto::{BookmarkResponse, EventResponse, ListEventsResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ResponseMeta};
use crate::api::AppState;
use crate::error::Result;
use crate::services::RecommendedEvent;

fn events_response(events: Result<Vec<RecommendedEvent>>) -> ApiResponse<ListEventsResponse> {
    match events {
        Ok(events) => {
            let total = events.len();
            ApiResponse::success_with_meta(
                ListEventsResponse {
                    events: events.into_iter().map(EventResponse::from).collect(),
                },
                ResponseMeta::total(total),
            )
        }
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/events`
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "events",
    operation_id = "events.list",
    params(("X-User-Id" = String, Header, description = "Session user id")),
    responses(
        (status = 200, description = "Full event catalog", body = ListEventsResponse),
        (status = 401, description = "Missing API key or unknown user", body = ApiError),
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> ApiResponse<ListEventsResponse> {
    events_response(state.recommendations.all_events(&session).await)
}

/// `GET /api/v1/events:recommended`
///
/// Events sharing at least one tag with the session user's interests, in
/// catalog order.
#[utoipa::path(
    get,
    path = "/api/v1/events:recommended",
    tag = "events",
    operation_id = "events.recommended",
    params(("X-User-Id" = String, Header, description = "Session user id")),
    responses(
        (status = 200, description = "Recommended events", body = ListEventsResponse),
        (status = 401, description = "Missing API key or unknown user", body = ApiError),
    )
)]
pub async fn recommended_events(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> ApiResponse<ListEventsResponse> {
    events_response(state.recommendations.recommended_events(&session).await)
}

/// `PUT /api/v1/events/{eventId}/bookmark`
#[utoipa::path(
    put,
    path = "/api/v1/events/{eventId}/bookmark",
    tag = "events",
    operation_id = "events.bookmark",
    params(
        ("eventId" = String, Path, description = "Event ID"),
        ("X-User-Id" = String, Header, description = "Session user id"),
    ),
    responses(
        (status = 200, description = "Event bookmarked", body = BookmarkResponse),
        (status = 404, description = "Event not found", body = ApiError),
    )
)]
pub async fn add_bookmark(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(event_id): Path<String>,
) -> ApiResponse<BookmarkResponse> {
    set_bookmark(&state, &session, event_id, true).await
}

/// `DELETE /api/v1/events/{eventId}/bookmark`
#[utoipa::path(
    delete,
    path = "/api/v1/events/{eventId}/bookmark",
    tag = "events",
    operation_id = "events.unbookmark",
    params(
        ("eventId" = String, Path, description = "Event ID"),
        ("X-User-Id" = String, Header, description = "Session user id"),
    ),
    responses(
        (status = 200, description = "Bookmark removed", body = BookmarkResponse),
        (status = 404, description = "Event not found", body = ApiError),
    )
)]
pub async fn remove_bookmark(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(event_id): Path<String>,
) -> ApiResponse<BookmarkResponse> {
    set_bookmark(&state, &session, event_id, false).await
}

async fn set_bookmark(
    state: &AppState,
    session: &crate::models::Session,
    event_id: String,
    bookmarked: bool,
) -> ApiResponse<BookmarkResponse> {
    match state
        .profile
        .set_bookmark(session, &event_id, bookmarked)
        .await
    {
        Ok(user) => ApiResponse::success(BookmarkResponse {
            is_bookmarked: user.has_bookmarked(&event_id),
            event_id,
        }),
        Err(e) => e.into(),
    }
}

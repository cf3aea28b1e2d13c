use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::api::state::AppState;

use super::handlers;
use super::middleware::v1_auth_middleware;

pub fn v1_router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router());

    let protected_routes = Router::new()
        .route("/ask", post(handlers::ask::ask))
        .route("/questions", get(handlers::questions::list_questions))
        .route("/events", get(handlers::events::list_events))
        .route(
            "/events:recommended",
            get(handlers::events::recommended_events),
        )
        .route(
            "/events/{eventId}/bookmark",
            put(handlers::events::add_bookmark).delete(handlers::events::remove_bookmark),
        )
        .route(
            "/collaborators",
            get(handlers::collaborators::list_collaborators),
        )
        .route("/profile", get(handlers::profile::get_profile))
        .route(
            "/profile/interests",
            put(handlers::profile::update_interests),
        )
        .route_layer(middleware::from_fn_with_state(state, v1_auth_middleware));

    Router::new().merge(public_routes).merge(protected_routes)
}

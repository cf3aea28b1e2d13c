use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CampusConnect API",
        version = "1.0.0",
        description = "Campus question answering, event recommendations and peer matching.",
    ),
    paths(
        handlers::health::health_check,
        handlers::ask::ask,
        handlers::questions::list_questions,
        handlers::events::list_events,
        handlers::events::recommended_events,
        handlers::events::add_bookmark,
        handlers::events::remove_bookmark,
        handlers::collaborators::list_collaborators,
        handlers::profile::get_profile,
        handlers::profile::update_interests,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        response::ResponseMeta,
        // Ask
        dto::ask::AskRequest,
        dto::ask::AskResponse,
        // Questions
        dto::questions::ListQuestionsQuery,
        dto::questions::QuestionResponse,
        dto::questions::ListQuestionsResponse,
        // Events
        dto::events::EventResponse,
        dto::events::ListEventsResponse,
        dto::events::BookmarkResponse,
        // Collaborators
        dto::collaborators::CollaboratorResponse,
        dto::collaborators::ListCollaboratorsResponse,
        // Profile
        dto::profile::ProfileResponse,
        dto::profile::UpdateInterestsRequest,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::DatabaseStatus,
        handlers::health::LlmStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "ask", description = "Question answering with suggested rephrasings"),
        (name = "questions", description = "Question history"),
        (name = "events", description = "Event catalog, recommendations and bookmarks"),
        (name = "collaborators", description = "Peers with shared interests"),
        (name = "profile", description = "Session user profile and interests"),
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            utoipa::openapi::security::SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}

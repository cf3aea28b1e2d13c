use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::RecommendedEvent;

use super::sorted_tags;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    #[schema(value_type = String)]
    pub date: DateTime<Utc>,
    pub event_url: String,
    pub tags: Vec<String>,
    pub image: String,
    /// Whether the session user bookmarked this event.
    pub is_bookmarked: bool,
}

impl From<RecommendedEvent> for EventResponse {
    fn from(item: RecommendedEvent) -> Self {
        let RecommendedEvent {
            event,
            is_bookmarked,
        } = item;
        Self {
            tags: sorted_tags(&event.tags),
            id: event.id,
            title: event.title,
            description: event.description,
            date: event.date,
            event_url: event.event_url,
            image: event.image,
            is_bookmarked,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsResponse {
    pub events: Vec<EventResponse>,
}

/// Response for the bookmark endpoints.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkResponse {
    pub event_id: String,
    pub is_bookmarked: bool,
}

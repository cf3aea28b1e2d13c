use std::sync::Arc;

use crate::db::DatabaseBackend;
use crate::error::Result;
use crate::matching::match_candidates;
use crate::models::{Event, Session, UserProfile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendedEvent {
    pub event: Event,
    pub is_bookmarked: bool,
}

/// Interest-based event and peer recommendations for the session user.
#[derive(Clone)]
pub struct RecommendationService {
    db: Arc<dyn DatabaseBackend>,
}

impl RecommendationService {
    pub fn new(db: Arc<dyn DatabaseBackend>) -> Self {
        Self { db }
    }

    /// The full catalog, annotated with the session user's bookmarks.
    pub async fn all_events(&self, session: &Session) -> Result<Vec<RecommendedEvent>> {
        let events = self.db.list_events().await?;
        Ok(events
            .into_iter()
            .map(|event| annotate(session, event))
            .collect())
    }

    /// Events sharing at least one tag with the session user's interests.
    pub async fn recommended_events(&self, session: &Session) -> Result<Vec<RecommendedEvent>> {
        let events = self.db.list_events().await?;
        let matched = match_candidates(&session.user.interest_tags, &events, None);

        tracing::debug!(
            user_id = %session.uid(),
            candidates = events.len(),
            matched = matched.len(),
            "Matched events"
        );

        Ok(matched
            .into_iter()
            .map(|event| annotate(session, event.clone()))
            .collect())
    }

    /// Other users sharing at least one interest with the session user.
    pub async fn collaborators(&self, session: &Session) -> Result<Vec<UserProfile>> {
        let users = self.db.list_users().await?;
        let matched = match_candidates(&session.user.interest_tags, &users, Some(session.uid()));

        tracing::debug!(
            user_id = %session.uid(),
            candidates = users.len(),
            matched = matched.len(),
            "Matched collaborators"
        );

        Ok(matched.into_iter().cloned().collect())
    }
}

fn annotate(session: &Session, event: Event) -> RecommendedEvent {
    let is_bookmarked = session.user.has_bookmarked(&event.id);
    RecommendedEvent {
        event,
        is_bookmarked,
    }
}

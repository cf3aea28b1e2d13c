use std::sync::Arc;

use crate::db::DatabaseBackend;
use crate::error::{CampusError, Result};
use crate::models::{normalize_interests, Session, UserProfile};

/// Edits to the session user's own profile.
#[derive(Clone)]
pub struct ProfileService {
    db: Arc<dyn DatabaseBackend>,
}

impl ProfileService {
    pub fn new(db: Arc<dyn DatabaseBackend>) -> Self {
        Self { db }
    }

    /// Replace the interest tags and return the updated profile.
    ///
    /// Submitted tags are cleaned with [`normalize_interests`]; an empty
    /// result is allowed and simply switches recommendations off.
    pub async fn update_interests(
        &self,
        session: &Session,
        interests: &[String],
    ) -> Result<UserProfile> {
        let cleaned = normalize_interests(interests);

        if !self.db.update_interests(session.uid(), &cleaned).await? {
            return Err(CampusError::NotFound(format!("User {}", session.uid())));
        }

        tracing::info!(user_id = %session.uid(), count = cleaned.len(), "Updated interests");

        self.reload(session).await
    }

    /// Add or remove a bookmark on an existing event.
    pub async fn set_bookmark(
        &self,
        session: &Session,
        event_id: &str,
        bookmarked: bool,
    ) -> Result<UserProfile> {
        if self.db.get_event(event_id).await?.is_none() {
            return Err(CampusError::NotFound(format!("Event {event_id}")));
        }

        self.db
            .set_bookmark(session.uid(), event_id, bookmarked)
            .await?;

        tracing::debug!(user_id = %session.uid(), event_id, bookmarked, "Bookmark updated");

        self.reload(session).await
    }

    async fn reload(&self, session: &Session) -> Result<UserProfile> {
        self.db
            .get_user(session.uid())
            .await?
            .ok_or_else(|| CampusError::NotFound(format!("User {}", session.uid())))
    }
}

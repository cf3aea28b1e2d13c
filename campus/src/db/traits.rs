use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Event, Question, UserProfile};

// ---------------------------------------------------------------------------
// Individual store traits
// ---------------------------------------------------------------------------

/// Append-only question history.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn save_question(&self, question: &Question) -> Result<()>;

    /// Newest first, at most `limit` entries.
    async fn list_questions_by_user(&self, user_id: &str, limit: u32) -> Result<Vec<Question>>;
}

/// User profiles, their interests and bookmarks.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user(&self, uid: &str) -> Result<Option<UserProfile>>;
    async fn upsert_user(&self, user: &UserProfile) -> Result<()>;
    async fn list_users(&self) -> Result<Vec<UserProfile>>;

    /// Replace the interest tags. Returns `false` when the user does not exist.
    async fn update_interests(&self, uid: &str, interests: &[String]) -> Result<bool>;

    /// Add or remove one bookmark. Both operations are idempotent.
    async fn set_bookmark(&self, uid: &str, event_id: &str, bookmarked: bool) -> Result<()>;
}

/// The campus event catalog.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn upsert_event(&self, event: &Event) -> Result<()>;
    async fn get_event(&self, id: &str) -> Result<Option<Event>>;

    /// Ordered by date, then id.
    async fn list_events(&self) -> Result<Vec<Event>>;
}

// ---------------------------------------------------------------------------
// Unified backend supertrait
// ---------------------------------------------------------------------------

/// A complete database backend combining all store traits plus lifecycle
/// operations.
#[async_trait]
pub trait DatabaseBackend: QuestionStore + UserStore + EventStore {
    /// Sync with remote (e.g. Turso replication). No-op for local-only backends.
    async fn sync(&self) -> Result<()>;
}

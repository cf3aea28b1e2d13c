use async_trait::async_trait;

use crate::db::connection::Database;
use crate::db::repository::{EventRepository, QuestionRepository, UserRepository};
use crate::db::traits::{DatabaseBackend, EventStore, QuestionStore, UserStore};
use crate::error::Result;
use crate::models::{Event, Question, UserProfile};

pub struct LibSqlBackend {
    db: Database,
}

impl LibSqlBackend {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl QuestionStore for LibSqlBackend {
    async fn save_question(&self, question: &Question) -> Result<()> {
        let conn = self.db.connect()?;
        QuestionRepository::create(&conn, question).await
    }
    async fn list_questions_by_user(&self, user_id: &str, limit: u32) -> Result<Vec<Question>> {
        let conn = self.db.connect()?;
        QuestionRepository::list_by_user(&conn, user_id, limit).await
    }
}

#[async_trait]
impl UserStore for LibSqlBackend {
    async fn get_user(&self, uid: &str) -> Result<Option<UserProfile>> {
        let conn = self.db.connect()?;
        UserRepository::get_by_uid(&conn, uid).await
    }
    async fn upsert_user(&self, user: &UserProfile) -> Result<()> {
        let conn = self.db.connect()?;
        UserRepository::upsert(&conn, user).await
    }
    async fn list_users(&self) -> Result<Vec<UserProfile>> {
        let conn = self.db.connect()?;
        UserRepository::list(&conn).await
    }
    async fn update_interests(&self, uid: &str, interests: &[String]) -> Result<bool> {
        let conn = self.db.connect()?;
        UserRepository::update_interests(&conn, uid, interests).await
    }
    async fn set_bookmark(&self, uid: &str, event_id: &str, bookmarked: bool) -> Result<()> {
        let conn = self.db.connect()?;
        if bookmarked {
            UserRepository::add_bookmark(&conn, uid, event_id).await
        } else {
            UserRepository::remove_bookmark(&conn, uid, event_id).await
        }
    }
}

#[async_trait]
impl EventStore for LibSqlBackend {
    async fn upsert_event(&self, event: &Event) -> Result<()> {
        let conn = self.db.connect()?;
        EventRepository::upsert(&conn, event).await
    }
    async fn get_event(&self, id: &str) -> Result<Option<Event>> {
        let conn = self.db.connect()?;
        EventRepository::get_by_id(&conn, id).await
    }
    async fn list_events(&self) -> Result<Vec<Event>> {
        let conn = self.db.connect()?;
        EventRepository::list(&conn).await
    }
}

#[async_trait]
impl DatabaseBackend for LibSqlBackend {
    async fn sync(&self) -> Result<()> {
        self.db.sync().await
    }
}

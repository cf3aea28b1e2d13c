use std::sync::Arc;

use crate::ask::QueryOrchestrator;
use crate::db::DatabaseBackend;
use crate::error::{CampusError, Result};
use crate::models::{Question, Session};

const MAX_HISTORY_LIMIT: u32 = 100;

/// What the session user gets back from one question.
#[derive(Debug, Clone)]
pub struct AskResult {
    pub question: String,
    pub answer: String,
    pub suggestions: Vec<String>,
    /// `None` when the answer could not be saved to history.
    pub question_id: Option<String>,
}

#[derive(Clone)]
pub struct AskService {
    db: Arc<dyn DatabaseBackend>,
    orchestrator: QueryOrchestrator,
    default_history_limit: u32,
}

impl AskService {
    pub fn new(
        db: Arc<dyn DatabaseBackend>,
        orchestrator: QueryOrchestrator,
        default_history_limit: u32,
    ) -> Self {
        Self {
            db,
            orchestrator,
            default_history_limit: default_history_limit.clamp(1, MAX_HISTORY_LIMIT),
        }
    }

    /// Answer a question for the session user and record it in their
    /// history.
    ///
    /// A failed history write does not fail the request; the answer is still
    /// returned without a `question_id`.
    pub async fn ask(&self, session: &Session, query: &str) -> Result<AskResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CampusError::Validation("Query must not be empty".to_string()));
        }

        tracing::info!(user_id = %session.uid(), query_len = query.len(), "Answering question");

        let outcome = self.orchestrator.ask(query).await?;

        let record = Question::new(session.uid(), query, &outcome.answer);
        let question_id = match self.db.save_question(&record).await {
            Ok(()) => Some(record.id),
            Err(e) => {
                tracing::error!(
                    user_id = %session.uid(),
                    error = %e,
                    "Failed to save question to history"
                );
                None
            }
        };

        Ok(AskResult {
            question: query.to_string(),
            answer: outcome.answer,
            suggestions: outcome.suggestions,
            question_id,
        })
    }

    /// The session user's questions, newest first.
    pub async fn history(&self, session: &Session, limit: Option<u32>) -> Result<Vec<Question>> {
        let limit = limit
            .unwrap_or(self.default_history_limit)
            .clamp(1, MAX_HISTORY_LIMIT);
        self.db.list_questions_by_user(session.uid(), limit).await
    }
}

use std::sync::Arc;

use crate::ask::retry::RetryPolicy;
use crate::ask::suggestions::parse_suggestions;
use crate::error::{CampusError, Result};
use crate::llm::prompts::{answer_prompt, did_you_mean_prompt};
use crate::llm::TextGenerator;

/// Combined result of one orchestration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskOutcome {
    pub answer: String,
    pub suggestions: Vec<String>,
}

/// Runs the answer and "did you mean" generations for one question.
///
/// Both requests are issued concurrently and each is retried under the same
/// [`RetryPolicy`]. The call resolves once both have succeeded, or fails as
/// soon as either one fails terminally; a partial result is never returned.
#[derive(Clone)]
pub struct QueryOrchestrator {
    generator: Arc<dyn TextGenerator>,
    retry: RetryPolicy,
    suggestion_count: usize,
}

impl QueryOrchestrator {
    pub fn new(generator: Arc<dyn TextGenerator>, retry: RetryPolicy) -> Self {
        Self {
            generator,
            retry,
            suggestion_count: 2,
        }
    }

    pub fn with_suggestion_count(mut self, count: usize) -> Self {
        self.suggestion_count = count;
        self
    }

    /// `user_query` is expected to be non-blank; callers validate first.
    pub async fn ask(&self, user_query: &str) -> Result<AskOutcome> {
        let answer = self.retry.run("answer", || self.generate_answer(user_query));
        let suggestions = self
            .retry
            .run("suggestions", || self.generate_suggestions(user_query));

        let (answer, suggestions) = tokio::try_join!(answer, suggestions)?;

        tracing::debug!(
            answer_len = answer.len(),
            suggestions = suggestions.len(),
            "Orchestration complete"
        );

        Ok(AskOutcome {
            answer,
            suggestions,
        })
    }

    async fn generate_answer(&self, user_query: &str) -> Result<String> {
        let answer = self.generator.generate(&answer_prompt(user_query)).await?;
        if answer.trim().is_empty() {
            return Err(CampusError::Llm("Answer was empty".to_string()));
        }
        Ok(answer)
    }

    async fn generate_suggestions(&self, user_query: &str) -> Result<Vec<String>> {
        let raw = self
            .generator
            .generate(&did_you_mean_prompt(user_query, self.suggestion_count))
            .await?;
        parse_suggestions(&raw)
    }
}

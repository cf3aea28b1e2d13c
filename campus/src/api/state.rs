use std::sync::Arc;

use crate::ask::QueryOrchestrator;
use crate::config::Config;
use crate::db::DatabaseBackend;
use crate::llm::{LlmProvider, TextGenerator};
use crate::services::{AskService, ProfileService, RecommendationService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn DatabaseBackend>,
    pub llm: LlmProvider,
    pub ask: AskService,
    pub recommendations: RecommendationService,
    pub profile: ProfileService,
}

impl AppState {
    pub fn new(config: Config, db: Arc<dyn DatabaseBackend>, llm: LlmProvider) -> Self {
        let generator: Arc<dyn TextGenerator> = Arc::new(llm.clone());
        Self::with_generator(config, db, llm, generator)
    }

    /// Like [`AppState::new`] but answers with `generator` instead of the
    /// configured LLM provider.
    pub fn with_generator(
        config: Config,
        db: Arc<dyn DatabaseBackend>,
        llm: LlmProvider,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let config = Arc::new(config);
        let orchestrator = QueryOrchestrator::new(generator, config.ask.retry_policy())
            .with_suggestion_count(config.ask.suggestion_count);
        let ask = AskService::new(db.clone(), orchestrator, config.ask.history_limit);
        let recommendations = RecommendationService::new(db.clone());
        let profile = ProfileService::new(db.clone());

        Self {
            config,
            db,
            llm,
            ask,
            recommendations,
            profile,
        }
    }
}

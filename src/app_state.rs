use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    repositories::InMemorySessionRepository,
    services::{
        completion_client::{ChatCompletionClient, CompletionCache, CompletionClient},
        quiz_service::QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let client = Arc::new(ChatCompletionClient::new(&config)?);
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: Config, client: Arc<dyn CompletionClient>) -> Self {
        let sessions = Arc::new(InMemorySessionRepository::new(config.session_ttl()));
        let cache = config.completion_cache_enabled.then(CompletionCache::new);
        let quiz_service = Arc::new(QuizService::new(client, cache, sessions));

        Self {
            quiz_service,
            config: Arc::new(config),
        }
    }
}

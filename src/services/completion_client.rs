use std::{collections::HashMap, sync::Arc, time::Duration};

use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;

use crate::{
    config::Config,
    constants::quiz_prompt::question_generation_prompt,
    errors::{AppError, AppResult},
    models::domain::language::Language,
};

/// Source of raw, unparsed question text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn generate_questions(&self, language: Language) -> AppResult<String>;
}

/// Chat-completion client for any OpenAI-compatible endpoint (Groq by default).
pub struct ChatCompletionClient {
    client: Client<OpenAIConfig>,
    model: String,
    question_count: usize,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionBody {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl ChatCompletionClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let api_key = config.completion_api_key.as_ref().ok_or_else(|| {
            AppError::ConfigurationError("GROQ_API_KEY is not set".to_string())
        })?;

        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key.expose_secret())
            .with_api_base(config.completion_api_base.as_str());

        Ok(Self {
            client: Client::with_config(openai_config),
            model: config.completion_model.clone(),
            question_count: config.question_count,
            timeout: config.completion_timeout(),
        })
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionClient {
    async fn generate_questions(&self, language: Language) -> AppResult<String> {
        let request = json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": question_generation_prompt(language, self.question_count),
                }
            ],
        });

        log::info!(
            "Requesting {} questions for {} from {}",
            self.question_count,
            language,
            self.model
        );

        let body: ChatCompletionBody =
            tokio::time::timeout(self.timeout, self.client.chat().create_byot(request)).await??;

        first_message_content(body)
    }
}

fn first_message_content(body: ChatCompletionBody) -> AppResult<String> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| AppError::FetchFailure("completion returned no text".to_string()))
}

/// Successful completions per language, kept for the life of the process.
/// Clones share the same entries.
#[derive(Clone, Default)]
pub struct CompletionCache {
    entries: Arc<RwLock<HashMap<Language, String>>>,
}

impl CompletionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, language: Language) -> Option<String> {
        self.entries.read().await.get(&language).cloned()
    }

    pub async fn insert(&self, language: Language, text: String) {
        self.entries.write().await.insert(language, text);
    }

    pub async fn invalidate(&self, language: Language) {
        self.entries.write().await.remove(&language);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: serde_json::Value) -> ChatCompletionBody {
        serde_json::from_value(json).expect("body should deserialize")
    }

    #[test]
    fn extracts_first_choice_content() {
        let body = body(json!({
            "id": "chatcmpl-1",
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "Q1. Hi?\nA) yes" } },
                { "index": 1, "message": { "role": "assistant", "content": "ignored" } }
            ]
        }));

        assert_eq!(first_message_content(body).unwrap(), "Q1. Hi?\nA) yes");
    }

    #[test]
    fn blank_or_missing_content_is_fetch_failure() {
        let empty = body(json!({ "choices": [] }));
        let blank = body(json!({ "choices": [{ "message": { "content": "  \n" } }] }));
        let null = body(json!({ "choices": [{ "message": { "content": null } }] }));

        for b in [empty, blank, null] {
            assert!(matches!(first_message_content(b), Err(AppError::FetchFailure(_))));
        }
    }

    #[test]
    fn client_requires_api_key() {
        let config = Config {
            completion_api_key: None,
            ..Config::test_config()
        };

        assert!(matches!(
            ChatCompletionClient::new(&config),
            Err(AppError::ConfigurationError(_))
        ));
    }

    #[actix_web::test]
    async fn cache_round_trip_and_invalidate() {
        let cache = CompletionCache::new();
        assert_eq!(cache.get(Language::Go).await, None);

        cache.insert(Language::Go, "Q1. cached".to_string()).await;
        assert_eq!(cache.get(Language::Go).await.as_deref(), Some("Q1. cached"));
        assert_eq!(cache.get(Language::Ruby).await, None);

        cache.invalidate(Language::Go).await;
        assert_eq!(cache.get(Language::Go).await, None);
    }

    #[actix_web::test]
    async fn cache_clones_share_entries() {
        let cache = CompletionCache::new();
        let shared = cache.clone();

        shared.insert(Language::Swift, "Q1. shared".to_string()).await;

        assert_eq!(cache.get(Language::Swift).await.as_deref(), Some("Q1. shared"));
    }
}

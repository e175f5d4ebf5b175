use std::env;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

pub const DEFAULT_COMPLETION_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_COMPLETION_MODEL: &str = "llama3-8b-8192";
pub const MAX_SESSION_TTL_MINUTES: i64 = 7 * 24 * 60;

#[derive(Clone, Debug)]
pub struct Config {
    pub completion_api_key: Option<SecretString>,
    pub completion_api_base: String,
    pub completion_model: String,
    pub completion_timeout_secs: u64,
    pub completion_cache_enabled: bool,
    pub question_count: usize,
    pub session_ttl_minutes: i64,
    pub web_server_host: String,
    pub web_server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            completion_api_key: env::var("GROQ_API_KEY").ok().map(SecretString::from),
            completion_api_base: env::var("COMPLETION_API_BASE")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_API_BASE.to_string()),
            completion_model: env::var("COMPLETION_MODEL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_MODEL.to_string()),
            completion_timeout_secs: env::var("COMPLETION_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .filter(|t| *t > 0)
                .unwrap_or(60),
            completion_cache_enabled: env::var("COMPLETION_CACHE_ENABLED")
                .ok()
                .and_then(|c| c.parse().ok())
                .unwrap_or(true),
            question_count: env::var("QUESTION_COUNT")
                .ok()
                .and_then(|c| c.parse().ok())
                .filter(|c| *c > 0)
                .unwrap_or(10),
            session_ttl_minutes: env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .filter(|m| (1..=MAX_SESSION_TTL_MINUTES).contains(m))
                .unwrap_or(60),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Checks the settings the server cannot start without.
    pub fn validate(&self) -> AppResult<()> {
        let key = self.completion_api_key.as_ref().ok_or_else(|| {
            AppError::ConfigurationError(
                "GROQ_API_KEY is not set. Export it or add it to .env".to_string(),
            )
        })?;

        if key.expose_secret().trim().is_empty() {
            return Err(AppError::ConfigurationError(
                "GROQ_API_KEY is empty".to_string(),
            ));
        }

        if self.completion_api_base.trim().is_empty() {
            return Err(AppError::ConfigurationError(
                "COMPLETION_API_BASE is empty".to_string(),
            ));
        }

        if self.completion_timeout_secs == 0 {
            return Err(AppError::ConfigurationError(
                "COMPLETION_TIMEOUT_SECS must be positive".to_string(),
            ));
        }

        if !(1..=MAX_SESSION_TTL_MINUTES).contains(&self.session_ttl_minutes) {
            return Err(AppError::ConfigurationError(format!(
                "SESSION_TTL_MINUTES must be between 1 and {}",
                MAX_SESSION_TTL_MINUTES
            )));
        }

        Ok(())
    }

    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(self.completion_timeout_secs)
    }

    /// Idle lifetime of a quiz session, held to the accepted range.
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_ttl_minutes.clamp(1, MAX_SESSION_TTL_MINUTES))
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            completion_api_key: Some(SecretString::from("test_api_key".to_string())),
            completion_api_base: "http://127.0.0.1:9/v1".to_string(),
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            completion_timeout_secs: 1,
            completion_cache_enabled: true,
            question_count: 10,
            session_ttl_minutes: 60,
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
        }
    }
}

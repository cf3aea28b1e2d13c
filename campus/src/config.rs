use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::ask::RetryPolicy;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub llm: Option<LlmConfig>,
    pub ask: AskConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_keys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
    pub local_path: Option<String>,
}

/// LLM configuration for chat/completion models
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    /// HTTP-level retries inside the client. The ask flow retries on its own,
    /// so this defaults to 0.
    pub max_retries: u32,
}

/// Settings for the question-answering flow.
#[derive(Debug, Clone, Deserialize)]
pub struct AskConfig {
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
    pub suggestion_count: usize,
    pub history_limit: u32,
}

impl AskConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.retry_delay_ms),
        )
    }
}

impl Default for AskConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay_ms: 1000,
            suggestion_count: 2,
            history_limit: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Insert the demo events and students into an empty database on startup.
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        let ask_defaults = AskConfig::default();

        Self {
            server: ServerConfig {
                host: env::var("CAMPUS_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("CAMPUS_PORT", 3000),
                api_keys: env::var("CAMPUS_API_KEYS")
                    .map(|keys| {
                        keys.split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| "file:campus.db".to_string()),
                auth_token: env::var("DATABASE_AUTH_TOKEN").ok(),
                local_path: env::var("DATABASE_LOCAL_PATH").ok(),
            },
            llm: env::var("LLM_MODEL").ok().map(|model| LlmConfig {
                model,
                api_key: env::var("LLM_API_KEY").ok(),
                base_url: env::var("LLM_BASE_URL").ok(),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 30),
                max_retries: parse_env_or("LLM_MAX_RETRIES", 0),
            }),
            ask: AskConfig {
                max_attempts: parse_env_or("ASK_MAX_ATTEMPTS", ask_defaults.max_attempts),
                retry_delay_ms: parse_env_or("ASK_RETRY_DELAY_MS", ask_defaults.retry_delay_ms),
                suggestion_count: parse_env_or(
                    "ASK_SUGGESTION_COUNT",
                    ask_defaults.suggestion_count,
                ),
                history_limit: parse_env_or::<u32>(
                    "QUESTION_HISTORY_LIMIT",
                    ask_defaults.history_limit,
                )
                .clamp(1, 100),
            },
            catalog: CatalogConfig {
                seed_demo_data: parse_env_or("CAMPUS_SEED_DEMO_DATA", true),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}

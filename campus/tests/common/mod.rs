#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;
use tempfile::TempDir;

use campus::config::{
    AskConfig, CatalogConfig, Config, DatabaseConfig, LlmConfig, ServerConfig,
};
use campus::db::seed::seed_demo_catalog;
use campus::db::{Database, DatabaseBackend, LibSqlBackend};

pub const API_KEY: &str = "integration-key";

/// Marker that only appears in the "did you mean" prompt.
pub const SUGGESTION_PROMPT_MARKER: &str = "alternative ways";

pub fn llm_config_with_base_url(model: &str, base_url: String) -> LlmConfig {
    LlmConfig {
        model: model.to_string(),
        api_key: Some("test-key".to_string()),
        base_url: Some(base_url),
        timeout_secs: 5,
        max_retries: 0,
    }
}

pub fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "gpt-4o-mini",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 1,
            "completion_tokens": 1,
            "total_tokens": 2
        }
    })
}

/// Whether a chat-completions request body carries the suggestion prompt.
pub fn is_suggestion_request(body: &[u8]) -> bool {
    String::from_utf8_lossy(body).contains(SUGGESTION_PROMPT_MARKER)
}

fn database_config(dir: &TempDir) -> DatabaseConfig {
    DatabaseConfig {
        url: format!("file:{}", dir.path().join("campus.db").display()),
        auth_token: None,
        local_path: None,
    }
}

pub async fn seeded_backend(dir: &TempDir) -> Arc<dyn DatabaseBackend> {
    let database = Database::new(&database_config(dir))
        .await
        .expect("open database");
    let backend = LibSqlBackend::new(database);
    seed_demo_catalog(&backend).await.expect("seed demo catalog");
    Arc::new(backend)
}

/// Config pointing the LLM at `llm_base_url` with zero retry delay.
pub fn app_config(dir: &TempDir, llm_base_url: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            api_keys: vec![API_KEY.to_string()],
        },
        database: database_config(dir),
        llm: Some(llm_config_with_base_url("openai/gpt-4o-mini", llm_base_url)),
        ask: AskConfig {
            retry_delay_ms: 0,
            ..AskConfig::default()
        },
        catalog: CatalogConfig {
            seed_demo_data: true,
        },
    }
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

use async_trait::async_trait;

use crate::error::Result;

/// A single-prompt text generation backend.
///
/// The ask flow only needs "prompt in, text out"; anything that can do that
/// (a hosted model, a local model, a scripted fake in tests) plugs in here.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

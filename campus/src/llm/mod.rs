mod api;
mod generator;
pub mod prompts;
mod provider;

pub use api::LlmApiClient;
pub use generator::TextGenerator;
pub use provider::{LlmBackend, LlmProvider};

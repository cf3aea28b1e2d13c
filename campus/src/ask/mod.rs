//! Question answering: concurrent answer + "did you mean" generation with
//! bounded retry.

mod orchestrator;
mod retry;
mod suggestions;

pub use orchestrator::{AskOutcome, QueryOrchestrator};
pub use retry::RetryPolicy;
pub use suggestions::parse_suggestions;

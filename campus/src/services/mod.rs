mod ask;
mod profile;
mod recommendations;

pub use ask::{AskResult, AskService};
pub use profile::ProfileService;
pub use recommendations::{RecommendationService, RecommendedEvent};

//! v1 API Data Transfer Objects.
//!
//! Wire types for the v1 REST API, kept apart from the domain models in
//! `crate::models`. Field names are camelCase on the wire.

pub mod ask;
pub mod collaborators;
pub mod events;
pub mod profile;
pub mod questions;

pub use ask::*;
pub use collaborators::*;
pub use events::*;
pub use profile::*;
pub use questions::*;

use crate::models::TagSet;

/// Tags in a stable order for display.
pub(crate) fn sorted_tags(tags: &TagSet) -> Vec<String> {
    let mut sorted: Vec<String> = tags.iter().cloned().collect();
    sorted.sort();
    sorted
}

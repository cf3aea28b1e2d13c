mod events;
mod questions;
mod users;

pub use events::EventRepository;
pub use questions::QuestionRepository;
pub use users::UserRepository;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::Result;
use crate::models::TagSet;

/// Fixed-width RFC 3339 so stored timestamps sort lexically.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Tags are stored as a sorted JSON array.
pub(crate) fn tags_to_json(tags: &TagSet) -> Result<String> {
    let mut sorted: Vec<&String> = tags.iter().collect();
    sorted.sort();
    Ok(serde_json::to_string(&sorted)?)
}

pub(crate) fn tags_from_json(value: &str) -> TagSet {
    serde_json::from_str::<Vec<String>>(value)
        .map(|tags| tags.into_iter().collect())
        .unwrap_or_default()
}

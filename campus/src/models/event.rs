use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TagSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
    pub event_url: String,
    pub tags: TagSet,
    pub image: String,
}

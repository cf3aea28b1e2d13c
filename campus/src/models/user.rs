use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::TagSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub interest_tags: TagSet,
    pub bookmarked_events: HashSet<String>,
}

impl UserProfile {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
            email: None,
            photo_url: None,
            interest_tags: TagSet::new(),
            bookmarked_events: HashSet::new(),
        }
    }

    pub fn has_bookmarked(&self, event_id: &str) -> bool {
        self.bookmarked_events.contains(event_id)
    }
}

/// Clean up a submitted interest list.
///
/// Entries are trimmed, blanks dropped, and later entries that differ from an
/// earlier one only by case are discarded. The first spelling is kept as-is.
pub fn normalize_interests<I, S>(interests: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for interest in interests {
        let trimmed = interest.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            result.push(trimmed.to_string());
        }
    }

    result
}

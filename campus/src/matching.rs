//! Interest-based matching of events and peers.

use crate::models::{Event, TagSet, UserProfile};

/// Anything that can be recommended by shared interest.
pub trait Tagged {
    fn id(&self) -> &str;
    fn tags(&self) -> &TagSet;
}

impl Tagged for Event {
    fn id(&self) -> &str {
        &self.id
    }

    fn tags(&self) -> &TagSet {
        &self.tags
    }
}

impl Tagged for UserProfile {
    fn id(&self) -> &str {
        &self.uid
    }

    fn tags(&self) -> &TagSet {
        &self.interest_tags
    }
}

/// Whether two tag sets share at least one tag.
pub fn shares_interest(subject_tags: &TagSet, candidate_tags: &TagSet) -> bool {
    // iterate the smaller set
    let (small, large) = if subject_tags.len() <= candidate_tags.len() {
        (subject_tags, candidate_tags)
    } else {
        (candidate_tags, subject_tags)
    };
    small.iter().any(|tag| large.contains(tag))
}

/// Candidates sharing at least one tag with `subject_tags`, in input order.
///
/// A candidate whose id equals `exclude_id` is skipped; pass the subject's
/// own id when matching peers.
pub fn match_candidates<'a, C: Tagged>(
    subject_tags: &TagSet,
    candidates: &'a [C],
    exclude_id: Option<&str>,
) -> Vec<&'a C> {
    if subject_tags.is_empty() {
        return Vec::new();
    }

    candidates
        .iter()
        .filter(|candidate| exclude_id != Some(candidate.id()))
        .filter(|candidate| shares_interest(subject_tags, candidate.tags()))
        .collect()
}

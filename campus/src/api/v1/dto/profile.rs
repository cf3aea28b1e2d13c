use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::UserProfile;

use super::sorted_tags;

/// The session user's profile.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub interest_tags: Vec<String>,
    pub bookmarked_events: Vec<String>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(user: UserProfile) -> Self {
        let mut bookmarked_events: Vec<String> = user.bookmarked_events.into_iter().collect();
        bookmarked_events.sort();
        Self {
            interest_tags: sorted_tags(&user.interest_tags),
            uid: user.uid,
            display_name: user.display_name,
            email: user.email,
            photo_url: user.photo_url,
            bookmarked_events,
        }
    }
}

/// Request body for `PUT /v1/profile/interests`.
///
/// Entries are trimmed, blanks dropped and case-insensitive duplicates
/// removed before saving.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInterestsRequest {
    #[validate(length(max = 50, message = "At most 50 interests are allowed"))]
    pub interests: Vec<String>,
}

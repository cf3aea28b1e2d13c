use serde::Serialize;

use crate::models::{TagSet, UserProfile};

use super::sorted_tags;

/// A peer sharing at least one interest with the session user.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorResponse {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub interest_tags: Vec<String>,
    /// The interests this peer has in common with the session user.
    pub shared_interests: Vec<String>,
}

impl CollaboratorResponse {
    pub fn new(peer: UserProfile, session_tags: &TagSet) -> Self {
        let shared: TagSet = peer
            .interest_tags
            .intersection(session_tags)
            .cloned()
            .collect();
        Self {
            interest_tags: sorted_tags(&peer.interest_tags),
            shared_interests: sorted_tags(&shared),
            uid: peer.uid,
            display_name: peer.display_name,
            email: peer.email,
            photo_url: peer.photo_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListCollaboratorsResponse {
    pub collaborators: Vec<CollaboratorResponse>,
}

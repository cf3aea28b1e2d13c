use super::UserProfile;

/// The authenticated user for one request.
///
/// Built by the HTTP layer and handed to services explicitly; nothing in the
/// crate reads a process-wide "current user".
#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserProfile,
}

impl Session {
    pub fn new(user: UserProfile) -> Self {
        Self { user }
    }

    pub fn uid(&self) -> &str {
        &self.user.uid
    }
}

mod event;
mod question;
mod session;
mod user;

pub use event::*;
pub use question::*;
pub use session::*;
pub use user::*;

use std::collections::HashSet;

/// A set of interest tags. Membership only; comparison is exact and
/// case-sensitive.
pub type TagSet = HashSet<String>;

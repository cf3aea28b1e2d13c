pub mod ask;
pub mod collaborators;
pub mod events;
pub(crate) mod health;
pub mod profile;
pub mod questions;

pub use health::health_check;

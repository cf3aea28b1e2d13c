pub mod backends;
mod connection;
pub mod repository;
pub(crate) mod schema;
pub mod seed;
pub mod traits;

pub use backends::libsql::LibSqlBackend;
pub use connection::Database;
pub use traits::*;

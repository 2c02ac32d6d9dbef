//! Infrastructure layer implementations.

pub mod database;
pub mod observability;

pub use database::{SqliteClient, SqliteConfig};
pub use observability::init_tracing;

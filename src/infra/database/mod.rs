//! Concrete database client implementations.
//!
//! This module contains the database adapter that implements
//! the `ClientRepository` trait defined in the domain layer.

pub mod sqlite;

pub use sqlite::{SqliteClient, SqliteConfig};

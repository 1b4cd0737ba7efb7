//! SQLite storage layer for debtlist.
//!
//! Each operation acquires a connection, runs its statements in a
//! transaction, commits and releases the connection before returning.
//!
//! # Submodules
//!
//! - [`schema`] - Database schema definitions
//! - [`sqlite`] - Main SQLite storage implementation

pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteStorage;

//! Repository layer for database operations

pub mod import_history;
pub mod migrations;

pub use import_history::{HistoryQuery, SqliteHistoryStore};
pub use migrations::{connect, run_migrations};

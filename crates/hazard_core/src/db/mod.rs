//! SQLite storage bootstrap and schema migration entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the hazard store.
//! - Apply schema migrations in deterministic order.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write hazards before migrations succeed.
//! - Returned connections enforce foreign keys, so `ON DELETE CASCADE` holds.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory, open_db_with_config, prepare_connection};

pub type DbResult<T> = Result<T, DbError>;

/// Failures raised while opening a database or preparing its schema.
#[derive(Debug)]
pub enum DbError {
    /// Locator was empty or whitespace only.
    EmptyLocator,
    /// File could not be opened/created, or connection setup failed.
    StorageUnavailable(rusqlite::Error),
    /// Table creation or migration bookkeeping failed.
    Schema(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLocator => write!(f, "database locator must not be empty"),
            Self::StorageUnavailable(err) => write!(f, "storage unavailable: {err}"),
            Self::Schema(err) => write!(f, "schema setup failed: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) | Self::Schema(err) => Some(err),
            Self::EmptyLocator | Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::StorageUnavailable(value)
    }
}

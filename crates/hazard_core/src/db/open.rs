//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by the store contract.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use crate::config::{StoreConfig, DEFAULT_BUSY_TIMEOUT_MS};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens (or creates) a SQLite database file and applies pending migrations.
///
/// # Errors
/// - `DbError::EmptyLocator` when `path` is empty or blank.
/// - `DbError::StorageUnavailable` when the file cannot be opened.
/// - `DbError::Schema` / `DbError::UnsupportedSchemaVersion` on schema setup.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_file(
        path.as_ref(),
        Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
    )
}

/// Opens the database described by `config`.
///
/// Uses `config.db_path` and `config.busy_timeout_ms`; logging settings are
/// not consulted here.
pub fn open_db_with_config(config: &StoreConfig) -> DbResult<Connection> {
    open_file(
        config.db_path.as_path(),
        Duration::from_millis(config.busy_timeout_ms),
    )
}

/// Opens a private in-memory SQLite database and applies all migrations.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with(
        "memory",
        Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS),
        Connection::open_in_memory,
    )
}

fn open_file(path: &Path, busy_timeout: Duration) -> DbResult<Connection> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        error!("event=db_open module=db status=error mode=file error_code=db_empty_locator");
        return Err(DbError::EmptyLocator);
    }

    open_with("file", busy_timeout, || Connection::open(path))
}

fn open_with<F>(mode: &str, busy_timeout: Duration, opener: F) -> DbResult<Connection>
where
    F: FnOnce() -> rusqlite::Result<Connection>,
{
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match opener() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(DbError::StorageUnavailable(err));
        }
    };

    match bootstrap_connection(&mut conn, busy_timeout) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Bootstraps a connection opened elsewhere: pragmas, default busy timeout
/// and pending migrations.
pub fn prepare_connection(conn: &mut Connection) -> DbResult<()> {
    bootstrap_connection(conn, Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))
}

fn bootstrap_connection(conn: &mut Connection, busy_timeout: Duration) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(busy_timeout)?;
    apply_migrations(conn)?;
    Ok(())
}

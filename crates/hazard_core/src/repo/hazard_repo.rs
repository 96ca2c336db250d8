//! Hazard repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `hazards` table.
//! - Classify SQLite failures into constraint vs storage errors.
//!
//! # Invariants
//! - Rows are decoded by column name, never by position.
//! - Unknown hazard ids are reported through `bool`/`Option`, not errors.
//! - `update_hazard` reads and writes inside one immediate transaction.

use crate::db::DbError;
use crate::model::hazard::{Hazard, HazardId, HazardPatch, NewHazard};
use crate::model::user::UserId;
use rusqlite::{
    params, Connection, ErrorCode, OptionalExtension, Row, Transaction, TransactionBehavior,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

const HAZARD_SELECT_SQL: &str = "SELECT
    id,
    name,
    location,
    description,
    user_id
FROM hazards";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for hazard and user persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Store could not be opened or prepared.
    Db(DbError),
    /// Foreign key, UNIQUE or NOT NULL rule rejected the write.
    ConstraintViolation(rusqlite::Error),
    /// Any other SQLite/I/O failure, including `database is locked`.
    StorageUnavailable(rusqlite::Error),
    /// A stored row could not be decoded into a record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::ConstraintViolation(err) => write!(f, "constraint violation: {err}"),
            Self::StorageUnavailable(err) => write!(f, "storage unavailable: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::ConstraintViolation(err) | Self::StorageUnavailable(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if value.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
            return Self::ConstraintViolation(value);
        }
        match value {
            rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::IntegralValueOutOfRange(..) => Self::InvalidData(value.to_string()),
            other => Self::StorageUnavailable(other),
        }
    }
}

/// Repository interface for hazard CRUD operations.
pub trait HazardRepository {
    fn create_hazard(&self, hazard: &NewHazard) -> RepoResult<HazardId>;
    fn get_hazard(&self, id: HazardId) -> RepoResult<Option<Hazard>>;
    fn list_all_hazards(&self) -> RepoResult<Vec<Hazard>>;
    fn list_hazards_by_user(&self, user_id: UserId) -> RepoResult<Vec<Hazard>>;
    /// Returns `false` when no hazard has `id`.
    fn update_hazard(&self, id: HazardId, patch: &HazardPatch) -> RepoResult<bool>;
    /// Returns `false` when no hazard has `id`.
    fn delete_hazard(&self, id: HazardId) -> RepoResult<bool>;
    fn count_hazards(&self) -> RepoResult<u64>;
}

/// SQLite-backed hazard repository.
pub struct SqliteHazardRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHazardRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl HazardRepository for SqliteHazardRepository<'_> {
    fn create_hazard(&self, hazard: &NewHazard) -> RepoResult<HazardId> {
        self.conn.execute(
            "INSERT INTO hazards (name, location, description, user_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                hazard.name.as_str(),
                hazard.location.as_str(),
                hazard.description.as_deref(),
                hazard.user_id,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_hazard(&self, id: HazardId) -> RepoResult<Option<Hazard>> {
        find_hazard(self.conn, id)
    }

    fn list_all_hazards(&self) -> RepoResult<Vec<Hazard>> {
        let mut stmt = self.conn.prepare(&format!("{HAZARD_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut hazards = Vec::new();

        while let Some(row) = rows.next()? {
            hazards.push(parse_hazard_row(row)?);
        }

        Ok(hazards)
    }

    fn list_hazards_by_user(&self, user_id: UserId) -> RepoResult<Vec<Hazard>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{HAZARD_SELECT_SQL} WHERE user_id = ?1;"))?;
        let mut rows = stmt.query([user_id])?;
        let mut hazards = Vec::new();

        while let Some(row) = rows.next()? {
            hazards.push(parse_hazard_row(row)?);
        }

        Ok(hazards)
    }

    fn update_hazard(&self, id: HazardId, patch: &HazardPatch) -> RepoResult<bool> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let Some(existing) = find_hazard(&tx, id)? else {
            return Ok(false);
        };

        let merged = patch.merge_into(&existing);
        tx.execute(
            "UPDATE hazards
             SET
                name = ?1,
                location = ?2,
                description = ?3
             WHERE id = ?4;",
            params![
                merged.name.as_str(),
                merged.location.as_str(),
                merged.description.as_deref(),
                id,
            ],
        )?;
        tx.commit()?;

        Ok(true)
    }

    fn delete_hazard(&self, id: HazardId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM hazards WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn count_hazards(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM hazards;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative hazard count `{count}`")))
    }
}

fn find_hazard(conn: &Connection, id: HazardId) -> RepoResult<Option<Hazard>> {
    let mut stmt = conn.prepare(&format!("{HAZARD_SELECT_SQL} WHERE id = ?1;"))?;
    let hazard = stmt
        .query_row([id], |row| Ok(parse_hazard_row(row)))
        .optional()?;
    hazard.transpose()
}

fn parse_hazard_row(row: &Row<'_>) -> RepoResult<Hazard> {
    Ok(Hazard {
        id: row.get("id")?,
        name: row.get("name")?,
        location: row.get("location")?,
        description: row.get("description")?,
        user_id: row.get("user_id")?,
    })
}

//! User repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Create and remove the users that own hazards.
//!
//! # Invariants
//! - `delete_user` relies on `ON DELETE CASCADE` to remove owned hazards.
//! - Duplicate `username`/`email` surface as `RepoError::ConstraintViolation`.

use crate::model::user::{NewUser, User, UserId};
use crate::repo::hazard_repo::RepoResult;
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT id, username, email FROM users";

/// Repository interface for user persistence.
pub trait UserRepository {
    fn create_user(&self, user: &NewUser) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn list_users(&self) -> RepoResult<Vec<User>>;
    /// Deletes the user and every hazard it owns. Returns `false` when absent.
    fn delete_user(&self, id: UserId) -> RepoResult<bool>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &NewUser) -> RepoResult<UserId> {
        self.conn.execute(
            "INSERT INTO users (username, email) VALUES (?1, ?2);",
            params![user.username.as_str(), user.email.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE id = ?1;"))?;
        let user = stmt.query_row([id], parse_user_row).optional()?;
        Ok(user)
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;
        let users = stmt
            .query_map([], parse_user_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    fn delete_user(&self, id: UserId) -> RepoResult<bool> {
        let changed = self.conn.execute("DELETE FROM users WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        email: row.get("email")?,
    })
}

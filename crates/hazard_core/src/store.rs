//! Hazard store facade.
//!
//! # Responsibility
//! - Own one SQLite connection for the lifetime of the handle.
//! - Expose hazard CRUD plus the user operations needed to own hazards.
//!
//! # Invariants
//! - A `HazardStore` is only constructed over a bootstrapped connection
//!   (`foreign_keys=ON`, schema applied).
//! - Log lines carry ids and outcomes only, never hazard text.

use crate::config::StoreConfig;
use crate::db::{open_db, open_db_in_memory, open_db_with_config, prepare_connection};
use crate::db::{DbError, DbResult};
use crate::model::hazard::{Hazard, HazardId, HazardPatch, NewHazard};
use crate::model::user::{NewUser, User, UserId};
use crate::repo::hazard_repo::{HazardRepository, RepoResult, SqliteHazardRepository};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use log::{debug, info, warn};
use rusqlite::Connection;
use std::path::Path;

/// Single-connection hazard store.
///
/// Not `Sync`: callers that share a store across threads must add their own
/// locking around it.
#[derive(Debug)]
pub struct HazardStore {
    conn: Connection,
}

impl HazardStore {
    /// Opens or creates the database at `locator` and ensures the schema.
    pub fn open(locator: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(locator)?,
        })
    }

    /// Opens a private in-memory store. Data vanishes with the handle.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Opens the database described by `config`.
    pub fn open_with_config(config: &StoreConfig) -> DbResult<Self> {
        Ok(Self {
            conn: open_db_with_config(config)?,
        })
    }

    /// Wraps an externally opened connection, bootstrapping it first.
    pub fn from_connection(mut conn: Connection) -> DbResult<Self> {
        prepare_connection(&mut conn)?;
        Ok(Self { conn })
    }

    /// Borrow of the underlying connection, e.g. for external user management.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Releases the connection, reporting a failed close instead of ignoring it.
    pub fn close(self) -> DbResult<()> {
        self.conn
            .close()
            .map_err(|(_, err)| DbError::StorageUnavailable(err))
    }

    /// Inserts a hazard owned by `user_id` and returns its new id.
    ///
    /// # Errors
    /// - `RepoError::ConstraintViolation` when `user_id` references no user.
    pub fn create_hazard(
        &self,
        name: &str,
        location: &str,
        description: Option<&str>,
        user_id: UserId,
    ) -> RepoResult<HazardId> {
        let hazard = NewHazard::new(name, location, description.map(str::to_owned), user_id);
        self.insert_hazard(&hazard)
    }

    /// Inserts a prepared [`NewHazard`].
    pub fn insert_hazard(&self, hazard: &NewHazard) -> RepoResult<HazardId> {
        match self.hazards().create_hazard(hazard) {
            Ok(id) => {
                info!(
                    "event=hazard_create module=store status=ok hazard_id={} user_id={}",
                    id, hazard.user_id
                );
                Ok(id)
            }
            Err(err) => {
                warn!(
                    "event=hazard_create module=store status=error user_id={} error={}",
                    hazard.user_id, err
                );
                Err(err)
            }
        }
    }

    pub fn get_hazard(&self, id: HazardId) -> RepoResult<Option<Hazard>> {
        self.hazards().get_hazard(id)
    }

    /// Every stored hazard in storage order; no ordering is guaranteed.
    pub fn list_all_hazards(&self) -> RepoResult<Vec<Hazard>> {
        let hazards = self.hazards().list_all_hazards()?;
        debug!(
            "event=hazard_list module=store status=ok scope=all count={}",
            hazards.len()
        );
        Ok(hazards)
    }

    /// Hazards owned by `user_id`. An unknown user yields an empty list.
    pub fn list_hazards_by_user(&self, user_id: UserId) -> RepoResult<Vec<Hazard>> {
        let hazards = self.hazards().list_hazards_by_user(user_id)?;
        debug!(
            "event=hazard_list module=store status=ok scope=user user_id={} count={}",
            user_id,
            hazards.len()
        );
        Ok(hazards)
    }

    /// Replaces the given fields of hazard `id`.
    ///
    /// `None` and `Some("")` both keep the stored value. Returns `false` when
    /// the hazard does not exist.
    pub fn update_hazard(
        &self,
        id: HazardId,
        name: Option<&str>,
        location: Option<&str>,
        description: Option<&str>,
    ) -> RepoResult<bool> {
        self.apply_patch(id, &HazardPatch::new(name, location, description))
    }

    /// Applies a prepared [`HazardPatch`]; see [`Self::update_hazard`].
    pub fn apply_patch(&self, id: HazardId, patch: &HazardPatch) -> RepoResult<bool> {
        let updated = self.hazards().update_hazard(id, patch)?;
        info!(
            "event=hazard_update module=store status={} hazard_id={}",
            found_status(updated),
            id
        );
        Ok(updated)
    }

    /// Removes hazard `id`. Returns `false` when nothing matched.
    pub fn delete_hazard(&self, id: HazardId) -> RepoResult<bool> {
        let deleted = self.hazards().delete_hazard(id)?;
        info!(
            "event=hazard_delete module=store status={} hazard_id={}",
            found_status(deleted),
            id
        );
        Ok(deleted)
    }

    pub fn count_hazards(&self) -> RepoResult<u64> {
        self.hazards().count_hazards()
    }

    /// Inserts a user and returns its new id.
    ///
    /// # Errors
    /// - `RepoError::ConstraintViolation` on duplicate username or email.
    pub fn create_user(&self, username: &str, email: &str) -> RepoResult<UserId> {
        let id = self.users().create_user(&NewUser::new(username, email))?;
        info!("event=user_create module=store status=ok user_id={id}");
        Ok(id)
    }

    pub fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.users().get_user(id)
    }

    pub fn list_users(&self) -> RepoResult<Vec<User>> {
        self.users().list_users()
    }

    /// Deletes user `id` together with all hazards it owns.
    pub fn delete_user(&self, id: UserId) -> RepoResult<bool> {
        let deleted = self.users().delete_user(id)?;
        info!(
            "event=user_delete module=store status={} user_id={}",
            found_status(deleted),
            id
        );
        Ok(deleted)
    }

    fn hazards(&self) -> SqliteHazardRepository<'_> {
        SqliteHazardRepository::new(&self.conn)
    }

    fn users(&self) -> SqliteUserRepository<'_> {
        SqliteUserRepository::new(&self.conn)
    }
}

fn found_status(found: bool) -> &'static str {
    if found {
        "ok"
    } else {
        "not_found"
    }
}

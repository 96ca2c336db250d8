//! Persistence layer for user-submitted hazard reports.
//! Owns the `users`/`hazards` schema and all hazard CRUD over SQLite.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use config::{ConfigError, StoreConfig, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_DB_FILE};
pub use db::{DbError, DbResult};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::hazard::{Hazard, HazardId, HazardPatch, NewHazard};
pub use model::user::{NewUser, User, UserId};
pub use repo::hazard_repo::{HazardRepository, RepoError, RepoResult, SqliteHazardRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use store::HazardStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

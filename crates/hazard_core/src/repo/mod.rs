//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts for hazards and their owning users.
//! - Isolate SQLite query details from the store facade.
//!
//! # Invariants
//! - Repository APIs distinguish "not found" (`bool`/`Option`) from
//!   storage failures (`RepoError`).
//! - Connections handed to repositories already have the schema applied.

pub mod hazard_repo;
pub mod user_repo;

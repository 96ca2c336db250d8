//! Domain model for hazard reports and their owning users.
//!
//! # Responsibility
//! - Define the records exchanged with callers of the store.
//! - Own the partial-update merge rule for hazards.
//!
//! # Invariants
//! - Every hazard references exactly one user via `user_id`.
//! - Identifiers are assigned by storage and never reused by callers.

pub mod hazard;
pub mod user;

//! Hazard domain model.
//!
//! # Responsibility
//! - Define the persisted hazard record and its insert/patch requests.
//! - Implement the partial-update merge applied by `update_hazard`.
//!
//! # Invariants
//! - `name` and `location` are always present on a persisted hazard.
//! - A patch can replace a field but never clear it: absent and empty values
//!   both keep what is stored.

use super::user::UserId;
use serde::{Deserialize, Serialize};

/// Storage-assigned hazard identifier.
pub type HazardId = i64;

/// Persisted hazard report.
///
/// Serializes to the five-key object `{id, name, location, description,
/// user_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: HazardId,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    /// Owning user; the hazard is removed when that user is deleted.
    pub user_id: UserId,
}

/// Insert request for a hazard. The id is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHazard {
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub user_id: UserId,
}

impl NewHazard {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        description: Option<String>,
        user_id: UserId,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            description,
            user_id,
        }
    }
}

/// Replacement values for `update_hazard`.
///
/// Each field is applied only when it holds a non-empty string. `None` and
/// `Some("")` are treated alike and keep the stored value, so a patch cannot
/// clear `description` once it is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HazardPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl HazardPatch {
    pub fn new(name: Option<&str>, location: Option<&str>, description: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_owned),
            location: location.map(str::to_owned),
            description: description.map(str::to_owned),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns `true` when no field would change any stored value.
    pub fn is_noop(&self) -> bool {
        replacement(&self.name).is_none()
            && replacement(&self.location).is_none()
            && replacement(&self.description).is_none()
    }

    /// Builds the record that results from applying this patch to `existing`.
    ///
    /// `id` and `user_id` are carried over unchanged.
    pub fn merge_into(&self, existing: &Hazard) -> Hazard {
        Hazard {
            id: existing.id,
            name: replacement(&self.name).unwrap_or(existing.name.as_str()).to_owned(),
            location: replacement(&self.location)
                .unwrap_or(existing.location.as_str())
                .to_owned(),
            description: match replacement(&self.description) {
                Some(value) => Some(value.to_owned()),
                None => existing.description.clone(),
            },
            user_id: existing.user_id,
        }
    }
}

fn replacement(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

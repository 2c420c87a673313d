//! Users and roles.

use crate::record::{new_record_id, Syncable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Privilege level, ordered from most to least powerful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    /// Full control, including user administration.
    TopAdmin,
    /// Full data access across branches.
    Admin,
    /// Day-to-day entry for assigned branches.
    Manager,
    /// Read-only.
    Viewer,
}

impl Role {
    /// Numeric rank; higher means more privileged.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            Role::TopAdmin => 3,
            Role::Admin => 2,
            Role::Manager => 1,
            Role::Viewer => 0,
        }
    }

    /// Returns true if this role meets or exceeds `required`.
    #[must_use]
    pub fn at_least(&self, required: Role) -> bool {
        self.rank() >= required.rank()
    }
}

/// A device-local user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable record id.
    pub id: String,
    /// Login name, unique by convention.
    pub username: String,
    /// Salted credential hash. Opaque to the sync core.
    pub password_hash: String,
    /// Privilege level.
    pub role: Role,
    /// Branches this user may access. Admins ignore this set.
    #[serde(default)]
    pub branch_ids: BTreeSet<String>,
    /// Freshness timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Tombstone marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new user with a fresh id, stamped now.
    #[must_use]
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
        Self {
            id: new_record_id(),
            username: username.into(),
            password_hash: password_hash.into(),
            role,
            branch_ids: BTreeSet::new(),
            updated_at: Some(Utc::now()),
            deleted_at: None,
        }
    }

    /// Returns true if the user may see the given branch.
    #[must_use]
    pub fn can_access_branch(&self, branch_id: &str) -> bool {
        self.role.at_least(Role::Admin) || self.branch_ids.contains(branch_id)
    }

    /// Bumps the freshness timestamp.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }

    /// Marks the user deleted.
    pub fn tombstone(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
        self.updated_at = Some(now);
    }
}

impl Syncable for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}

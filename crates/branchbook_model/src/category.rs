//! Expense categories.

use crate::record::{new_record_id, Syncable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-defined expense category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Stable record id.
    pub id: String,
    /// Category name.
    pub name: String,
    /// Freshness timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Tombstone marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Category {
    /// Creates a new category with a fresh id, stamped now.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            updated_at: Some(Utc::now()),
            deleted_at: None,
        }
    }

    /// Bumps the freshness timestamp.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }

    /// Marks the category deleted.
    pub fn tombstone(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
        self.updated_at = Some(now);
    }
}

impl Syncable for Category {
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

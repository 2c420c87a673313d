//! Restaurant branches.

use crate::record::{new_record_id, Syncable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A restaurant branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    /// Stable record id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Street address.
    #[serde(default)]
    pub address: String,
    /// Opening cash balance, cents.
    #[serde(default)]
    pub opening_cash: i64,
    /// Opening card balance, cents. Independent of the cash balance.
    #[serde(default)]
    pub opening_card: i64,
    /// Display color, e.g. `#e07a5f`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Freshness timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Tombstone marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Branch {
    /// Creates a new branch with a fresh id, stamped now.
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            address: address.into(),
            opening_cash: 0,
            opening_card: 0,
            color: None,
            updated_at: Some(Utc::now()),
            deleted_at: None,
        }
    }

    /// Sets both opening balances.
    #[must_use]
    pub fn with_opening_balances(mut self, cash: i64, card: i64) -> Self {
        self.opening_cash = cash;
        self.opening_card = card;
        self
    }

    /// Bumps the freshness timestamp.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }

    /// Marks the branch deleted.
    pub fn tombstone(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
        self.updated_at = Some(now);
    }
}

impl Syncable for Branch {
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

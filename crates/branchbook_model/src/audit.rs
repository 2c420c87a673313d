//! Audit log entries.

use crate::record::{new_record_id, Syncable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of action an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    /// A record was created.
    Create,
    /// A record was edited in place.
    Update,
    /// A record was tombstoned.
    Delete,
    /// A user logged in on this device.
    Login,
    /// A sync cycle adopted remote changes.
    Sync,
}

/// An append-only audit record.
///
/// Entries are immutable once created. They are never tombstoned; the merge
/// engine prunes the collection by truncating to the most recent entries,
/// so the log is a bounded recent window, not a complete history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    /// Stable record id.
    pub id: String,
    /// Username of the actor.
    pub actor: String,
    /// What happened.
    pub action: AuditAction,
    /// Id of the affected record, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub detail: String,
    /// Creation instant; doubles as the freshness timestamp.
    pub timestamp: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Creates a new entry stamped now.
    #[must_use]
    pub fn new(actor: impl Into<String>, action: AuditAction, detail: impl Into<String>) -> Self {
        Self {
            id: new_record_id(),
            actor: actor.into(),
            action,
            entity_id: None,
            detail: detail.into(),
            timestamp: Utc::now(),
        }
    }

    /// Attaches the id of the affected record.
    #[must_use]
    pub fn for_entity(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }
}

impl Syncable for AuditLogEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.timestamp)
    }
}

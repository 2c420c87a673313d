//! # BranchBook Merge Engine
//!
//! Pure reconciliation of dataset snapshots from independent replicas.
//!
//! Two devices mutate their local replicas while offline; when either
//! reaches the shared remote blob it merges the remote snapshot with its
//! own before pushing. The merge is last-writer-wins per record id:
//!
//! 1. Seed an id-keyed map from the local collection
//! 2. A remote record replaces the local entry only when its freshness
//!    timestamp is strictly newer (ties keep local)
//! 3. Tombstones compete as ordinary records, so a newer deletion wins
//!    over an older live copy and is never discarded for it
//!
//! ## Key Invariants
//!
//! - Total function: well-formed input never errors, records with an empty
//!   id are skipped silently
//! - At most one record per id in the output
//! - The audit log is bounded to [`MAX_AUDIT_LOG_ENTRIES`] after merge;
//!   entries beyond the cap are dropped for good
//! - Ordering is wall-clock only. A device with a skewed clock can make a
//!   stale edit win; the system accepts this in exchange for not carrying
//!   vector clocks

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod dataset;

pub use collection::merge_collection;
pub use dataset::{merge_dataset, MAX_AUDIT_LOG_ENTRIES};

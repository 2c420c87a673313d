//! # BranchBook Model
//!
//! Typed entity model for the BranchBook ledger.
//!
//! This crate provides:
//! - The [`Syncable`] record contract (stable id, freshness timestamp,
//!   optional tombstone)
//! - Concrete entity types: [`Transaction`], [`Branch`], [`User`],
//!   [`Category`], [`RecurringTransaction`], [`AuditLogEntry`]
//! - The [`Dataset`] snapshot, which is both the local persisted shape and
//!   the remote wire shape (JSON)
//! - Balance and report aggregation over a snapshot
//!
//! ## Key Invariants
//!
//! - Record ids are client-generated, stable, and unique per collection
//! - Deleting a record sets its tombstone; records are never removed from
//!   their collection
//! - Freshness timestamps order concurrent edits; they are wall-clock
//!   instants, not causality proofs
//! - Monetary amounts are integer cents

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod audit;
mod branch;
mod category;
mod dataset;
mod record;
mod recurring;
pub mod report;
mod settings;
mod transaction;
mod user;

pub use audit::{AuditAction, AuditLogEntry};
pub use branch::Branch;
pub use category::Category;
pub use dataset::{Dataset, SCHEMA_VERSION};
pub use record::{new_record_id, Syncable};
pub use recurring::RecurringTransaction;
pub use settings::ReportSettings;
pub use transaction::{
    EditSnapshot, IncomeBreakdown, PaymentStatus, Transaction, TransactionKind,
};
pub use user::{Role, User};

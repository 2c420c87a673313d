//! # BranchBook Sync
//!
//! Opportunistic synchronization of BranchBook replicas against a shared
//! remote blob store.
//!
//! This crate provides:
//! - HTTP client abstraction ([`HttpClient`]) with a mock for tests and a
//!   reqwest-backed implementation behind the `http-client` feature
//! - Remote blob client ([`RemoteClient`]) with retry, per-attempt
//!   timeouts, rate-limit cooldown, and payload capping
//! - The per-device busy gate and cooldown window ([`SyncGate`])
//! - The sync orchestrator ([`SyncOrchestrator`]): silent, manual, and
//!   periodic cycles
//! - The [`LocalStore`] adapter trait for the opaque local snapshot store
//!
//! ## Architecture
//!
//! A sync cycle is **fetch → merge → push**:
//! 1. Fetch the remote snapshot (absence means no remote state yet)
//! 2. Merge it with the local snapshot via the merge engine
//! 3. Push the merged, size-capped snapshot back when it differs
//!
//! The remote blob has no compare-and-swap; two devices can overwrite each
//! other's pushes and reconcile on the next cycle. Merging before every
//! push is what keeps that from losing data.
//!
//! ## Key Invariants
//!
//! - At most one cycle in flight per device; contended cycles skip
//! - A failed cycle returns the caller's snapshot unchanged
//! - The caller always gets a usable dataset; the public entry point never
//!   fails
//! - The pushed payload is capped; the adopted in-memory dataset is not

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod gate;
mod http;
mod orchestrator;
mod remote;
mod store;

pub use config::{RetryConfig, SyncConfig, SYNC_NAMESPACE};
pub use error::{SyncError, SyncResult};
pub use gate::{SyncGate, SyncGuard};
pub use http::{HttpClient, HttpError, HttpResponse, MockHttpClient};
#[cfg(feature = "http-client")]
pub use http::ReqwestClient;
pub use orchestrator::{SyncMode, SyncOrchestrator, SyncOutcome, SyncStats, SyncStatus};
pub use remote::{cap_for_push, RemoteClient};
pub use store::{LocalStore, MemoryStore};

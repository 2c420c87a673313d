//! Sync orchestration.

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::gate::SyncGate;
use crate::http::HttpClient;
use crate::remote::RemoteClient;
use crate::store::LocalStore;
use branchbook_merge::merge_dataset;
use branchbook_model::Dataset;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How a sync cycle was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Fired automatically after a local mutation or poll tick. Always
    /// quiet; the caller only adopts the returned dataset.
    Silent,
    /// Explicitly requested by the user. Always pushes, and the outcome's
    /// status and timing are meant to be surfaced.
    Manual,
}

/// Terminal status of a sync cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// Fetch, merge, and (if needed) push all succeeded.
    Completed,
    /// Another cycle held the gate; nothing was done.
    SkippedBusy,
    /// The cycle failed; the caller keeps its snapshot.
    Failed,
}

/// Result of one sync cycle. Always carries a usable dataset.
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// The dataset the caller should adopt. On failure this is the input,
    /// unchanged.
    pub dataset: Dataset,
    /// How the cycle ended.
    pub status: SyncStatus,
    /// Whether a push reached the remote.
    pub pushed: bool,
    /// Wall time spent in the cycle.
    pub duration: Duration,
    /// Human-readable failure or skip reason.
    pub message: Option<String>,
}

/// Counters across the lifetime of one orchestrator.
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Cycles that completed.
    pub cycles_completed: u64,
    /// Cycles skipped on gate contention.
    pub cycles_skipped: u64,
    /// Cycles that failed.
    pub cycles_failed: u64,
    /// Pushes that reached the remote.
    pub pushes: u64,
    /// Last failure message.
    pub last_error: Option<String>,
}

/// Coordinates when synchronization happens for one device.
///
/// Owns the busy gate and cooldown window, so multiple orchestrators (and
/// tests) never share state through the process.
pub struct SyncOrchestrator<C: HttpClient> {
    remote: RemoteClient<C>,
    gate: SyncGate,
    session_active: AtomicBool,
    stats: RwLock<SyncStats>,
}

impl<C: HttpClient> SyncOrchestrator<C> {
    /// Creates an orchestrator.
    pub fn new(config: SyncConfig, client: C) -> Self {
        Self {
            remote: RemoteClient::new(config, client),
            gate: SyncGate::new(),
            session_active: AtomicBool::new(false),
            stats: RwLock::new(SyncStats::default()),
        }
    }

    /// The gate serializing this device's cycles.
    pub fn gate(&self) -> &SyncGate {
        &self.gate
    }

    /// Lifetime counters.
    pub fn stats(&self) -> SyncStats {
        self.stats.read().clone()
    }

    /// Marks whether an authenticated session is present. Periodic polling
    /// only runs while this is set.
    pub fn set_session_active(&self, active: bool) {
        self.session_active.store(active, Ordering::SeqCst);
    }

    /// Returns true while an authenticated session is marked present.
    pub fn session_active(&self) -> bool {
        self.session_active.load(Ordering::SeqCst)
    }

    /// Runs one sync cycle against the given local snapshot.
    ///
    /// Never fails: every error path returns the input snapshot unchanged
    /// with a [`SyncStatus::Failed`] outcome, and gate contention returns
    /// immediately with [`SyncStatus::SkippedBusy`]. On success the
    /// returned dataset is the merged, untruncated result the caller
    /// should adopt as its new in-memory state.
    pub async fn sync(&self, local: Dataset, mode: SyncMode) -> SyncOutcome {
        let start = Instant::now();

        let Some(_guard) = self.gate.try_begin() else {
            debug!("sync cycle already in flight, skipping");
            self.stats.write().cycles_skipped += 1;
            return SyncOutcome {
                dataset: local,
                status: SyncStatus::SkippedBusy,
                pushed: false,
                duration: start.elapsed(),
                message: Some(SyncError::SyncInProgress.to_string()),
            };
        };

        match self.cycle(&local, mode).await {
            Ok((dataset, pushed)) => {
                let mut stats = self.stats.write();
                stats.cycles_completed += 1;
                if pushed {
                    stats.pushes += 1;
                }
                stats.last_error = None;
                drop(stats);
                SyncOutcome {
                    dataset,
                    status: SyncStatus::Completed,
                    pushed,
                    duration: start.elapsed(),
                    message: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "sync cycle failed, keeping local snapshot");
                let mut stats = self.stats.write();
                stats.cycles_failed += 1;
                stats.last_error = Some(e.to_string());
                drop(stats);
                SyncOutcome {
                    dataset: local,
                    status: SyncStatus::Failed,
                    pushed: false,
                    duration: start.elapsed(),
                    message: Some(e.to_string()),
                }
            }
        }
    }

    /// Convenience wrapper for mutation-triggered pushes: runs a silent
    /// cycle and returns only the dataset to adopt.
    pub async fn sync_after_mutation(&self, local: Dataset) -> Dataset {
        self.sync(local, SyncMode::Silent).await.dataset
    }

    /// Fetch, merge, and push once. Errors propagate to `sync`, which
    /// translates them into a degraded outcome.
    async fn cycle(&self, local: &Dataset, mode: SyncMode) -> SyncResult<(Dataset, bool)> {
        let fetched = self.remote.fetch(&self.gate).await?;

        let merged = match &fetched {
            Some(remote) => merge_dataset(local, remote),
            // No remote state: pass the local snapshot through untouched
            None => local.clone(),
        };

        let should_push = mode == SyncMode::Manual
            || match &fetched {
                None => true,
                Some(remote) => !merged.same_content(remote),
            };

        if should_push {
            self.remote.push(&self.gate, &merged).await?;
        } else {
            debug!("merged result matches remote, skipping push");
        }

        Ok((merged, should_push))
    }

    /// Runs one poll tick: load from the store, sync silently, save the
    /// adopted dataset back.
    pub async fn poll_once<S: LocalStore>(&self, store: &S) -> SyncResult<()> {
        let local = store.load()?;
        let outcome = self.sync(local, SyncMode::Silent).await;
        store.save(&outcome.dataset)?;
        Ok(())
    }

    /// Periodic polling loop. Ticks on the configured interval and runs a
    /// poll cycle while a sync key is configured and the session flag is
    /// set. Runs until the surrounding task is dropped.
    pub async fn run_periodic<S: LocalStore>(&self, store: &S) {
        let mut ticker = tokio::time::interval(self.remote.config().poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if !self.session_active() || self.remote.config().sync_key.is_none() {
                continue;
            }
            if let Err(e) = self.poll_once(store).await {
                warn!(error = %e, "periodic sync tick failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryConfig;
    use crate::http::{HttpResponse, MockHttpClient};
    use branchbook_model::{Transaction, TransactionKind};

    fn orchestrator() -> SyncOrchestrator<MockHttpClient> {
        let config = SyncConfig::new("https://blob.example.com")
            .with_sync_key("k1")
            .with_retry(RetryConfig::new(3, Duration::from_millis(1)))
            .with_timeout(Duration::from_millis(50));
        SyncOrchestrator::new(config, MockHttpClient::new())
    }

    fn remote_body(dataset: &Dataset) -> HttpResponse {
        HttpResponse::new(200, serde_json::to_string(dataset).unwrap())
    }

    fn tx(id: &str, amount: i64, updated: &str) -> Transaction {
        let mut t = Transaction::new("b1", "2024-01-01", amount, TransactionKind::Income, "sales");
        t.id = id.to_string();
        t.updated_at = Some(updated.parse().unwrap());
        t
    }

    #[tokio::test]
    async fn first_sync_pushes_local_state() {
        let orch = orchestrator();
        let mut local = Dataset::empty();
        local.transactions.push(tx("t1", 100, "2024-01-01T00:00:00Z"));

        let outcome = orch.sync(local.clone(), SyncMode::Silent).await;
        assert_eq!(outcome.status, SyncStatus::Completed);
        assert!(outcome.pushed);
        assert_eq!(outcome.dataset, local);
        assert_eq!(orch.stats().pushes, 1);
    }

    #[tokio::test]
    async fn merged_result_is_adopted() {
        let orch = orchestrator();
        let mut local = Dataset::empty();
        local.transactions.push(tx("t1", 100, "2024-01-01T00:00:00Z"));

        let mut remote = Dataset::empty();
        remote.transactions.push(tx("t1", 150, "2024-01-02T00:00:00Z"));
        orch.remote.client().enqueue_get(Ok(remote_body(&remote)));

        let outcome = orch.sync(local, SyncMode::Silent).await;
        assert_eq!(outcome.status, SyncStatus::Completed);
        assert_eq!(outcome.dataset.transactions[0].amount, 150);
    }

    #[tokio::test]
    async fn identical_remote_skips_push() {
        let orch = orchestrator();
        let mut remote = Dataset::empty();
        remote.transactions.push(tx("t1", 100, "2024-01-01T00:00:00Z"));
        orch.remote.client().enqueue_get(Ok(remote_body(&remote)));

        let outcome = orch.sync(remote, SyncMode::Silent).await;
        assert_eq!(outcome.status, SyncStatus::Completed);
        assert!(!outcome.pushed);
        assert!(orch.remote.client().posted().is_empty());
    }

    #[tokio::test]
    async fn manual_mode_always_pushes() {
        let orch = orchestrator();
        let mut remote = Dataset::empty();
        remote.transactions.push(tx("t1", 100, "2024-01-01T00:00:00Z"));
        orch.remote.client().enqueue_get(Ok(remote_body(&remote)));

        let outcome = orch.sync(remote, SyncMode::Manual).await;
        assert!(outcome.pushed);
        assert_eq!(orch.remote.client().posted().len(), 1);
    }

    #[tokio::test]
    async fn offline_degrades_to_input() {
        let orch = orchestrator();
        orch.remote.client().set_online(false);

        let mut local = Dataset::empty();
        local.transactions.push(tx("t1", 100, "2024-01-01T00:00:00Z"));

        let outcome = orch.sync(local.clone(), SyncMode::Manual).await;
        assert_eq!(outcome.status, SyncStatus::Failed);
        assert_eq!(outcome.dataset, local);
        assert!(outcome.message.is_some());
        assert_eq!(orch.stats().cycles_failed, 1);
    }

    #[tokio::test]
    async fn poll_once_saves_adopted_dataset() {
        use crate::store::{LocalStore, MemoryStore};

        let orch = orchestrator();
        let mut remote = Dataset::empty();
        remote.transactions.push(tx("t1", 150, "2024-01-02T00:00:00Z"));
        orch.remote.client().enqueue_get(Ok(remote_body(&remote)));

        let store = MemoryStore::new();
        orch.poll_once(&store).await.unwrap();

        let saved = store.load().unwrap();
        assert_eq!(saved.transactions.len(), 1);
        assert_eq!(saved.transactions[0].amount, 150);
    }

    #[tokio::test]
    async fn session_flag_toggles() {
        let orch = orchestrator();
        assert!(!orch.session_active());
        orch.set_session_active(true);
        assert!(orch.session_active());
    }
}

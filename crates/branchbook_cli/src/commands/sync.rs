//! Sync command implementation.

use crate::store::JsonFileStore;
use branchbook_sync::{
    LocalStore, ReqwestClient, SyncConfig, SyncMode, SyncOrchestrator, SyncStatus,
};
use std::path::Path;

/// Runs one manual sync cycle and saves the adopted dataset.
pub async fn run(snapshot: &Path, url: &str, key: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonFileStore::new(snapshot);
    let local = store.load()?;
    tracing::debug!(records = local.record_count(), "loaded local snapshot");

    let config = SyncConfig::new(url).with_sync_key(key);
    let orchestrator = SyncOrchestrator::new(config, ReqwestClient::new());

    let outcome = orchestrator.sync(local, SyncMode::Manual).await;
    store.save(&outcome.dataset)?;

    match outcome.status {
        SyncStatus::Completed => {
            println!(
                "Sync completed in {:?} ({} records{})",
                outcome.duration,
                outcome.dataset.record_count(),
                if outcome.pushed { ", pushed" } else { "" },
            );
            Ok(())
        }
        SyncStatus::SkippedBusy => {
            println!("Sync skipped: another cycle was in progress");
            Ok(())
        }
        SyncStatus::Failed => {
            let message = outcome.message.unwrap_or_else(|| "unknown error".into());
            Err(format!("Sync failed: {message}").into())
        }
    }
}

//! Remote blob client.

use crate::config::{SyncConfig, SYNC_NAMESPACE};
use crate::error::{SyncError, SyncResult};
use crate::gate::SyncGate;
use crate::http::{HttpClient, HttpError, HttpResponse};
use branchbook_model::Dataset;
use tracing::{debug, warn};

/// Shapes a dataset for pushing: the transactions collection is truncated
/// to the `cap` most recent records by date-string descending.
///
/// Only the pushed payload is capped; the local replica keeps the full
/// history.
#[must_use]
pub fn cap_for_push(dataset: &Dataset, cap: usize) -> Dataset {
    let mut shaped = dataset.clone();
    shaped.transactions.sort_by(|a, b| b.date.cmp(&a.date));
    shaped.transactions.truncate(cap);
    shaped
}

/// What a single attempt sends.
#[derive(Clone, Copy)]
enum Payload<'a> {
    Get,
    Post(&'a str),
}

/// Client for the shared remote blob slot.
///
/// The slot is addressed as `{base_url}/{sync_key}/{namespace}`: GET
/// returns the last pushed snapshot, POST overwrites it wholesale. The
/// store offers no compare-and-swap; callers must merge before pushing.
pub struct RemoteClient<C: HttpClient> {
    config: SyncConfig,
    client: C,
}

impl<C: HttpClient> RemoteClient<C> {
    /// Creates a client.
    pub fn new(config: SyncConfig, client: C) -> Self {
        Self { config, client }
    }

    /// The active configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &C {
        &self.client
    }

    fn blob_url(&self) -> SyncResult<String> {
        let key = self.config.sync_key.as_deref().ok_or(SyncError::NoSyncKey)?;
        Ok(format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            key,
            SYNC_NAMESPACE
        ))
    }

    /// Fetches the current remote snapshot.
    ///
    /// `Ok(None)` covers "no remote state yet": a 404, an empty body, or a
    /// body that does not parse as a snapshot (logged and treated as
    /// absent rather than failing the cycle).
    pub async fn fetch(&self, gate: &SyncGate) -> SyncResult<Option<Dataset>> {
        let url = self.blob_url()?;
        let response = self.send(gate, &url, Payload::Get).await?;

        if response.status == 404 {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(SyncError::Server {
                status: response.status,
            });
        }
        if response.body.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<Dataset>(&response.body) {
            Ok(dataset) => {
                debug!(records = dataset.record_count(), "fetched remote snapshot");
                Ok(Some(dataset))
            }
            Err(e) => {
                warn!(error = %e, "remote snapshot did not parse, treating as absent");
                Ok(None)
            }
        }
    }

    /// Pushes a snapshot, overwriting the remote slot.
    ///
    /// The payload is capped via [`cap_for_push`] before encoding.
    pub async fn push(&self, gate: &SyncGate, dataset: &Dataset) -> SyncResult<()> {
        let url = self.blob_url()?;
        let shaped = cap_for_push(dataset, self.config.cloud_transaction_cap);
        let body = serde_json::to_string(&shaped)
            .map_err(|e| SyncError::transport_fatal(format!("encode failed: {e}")))?;

        let response = self.send(gate, &url, Payload::Post(&body)).await?;
        if !response.is_success() {
            return Err(SyncError::Server {
                status: response.status,
            });
        }
        debug!(
            transactions = shaped.transactions.len(),
            bytes = body.len(),
            "pushed snapshot"
        );
        Ok(())
    }

    /// Runs one request through the guard rails: online check, cooldown
    /// check, per-attempt timeout, fixed-delay retries for transient
    /// failures, and cooldown engagement on overload statuses.
    async fn send(
        &self,
        gate: &SyncGate,
        url: &str,
        payload: Payload<'_>,
    ) -> SyncResult<HttpResponse> {
        let retry = &self.config.retry;
        let mut last_error = None;

        for attempt in 0..retry.max_attempts {
            if attempt > 0 {
                tokio::time::sleep(retry.delay).await;
                debug!(attempt, "retrying request");
            }

            if !self.client.is_online() {
                return Err(SyncError::Offline);
            }
            if let Some(remaining) = gate.cooldown_remaining() {
                return Err(SyncError::CoolingDown { remaining });
            }

            let attempt_future = async {
                match payload {
                    Payload::Get => self.client.get(url).await,
                    Payload::Post(body) => self.client.post(url, body.to_string()).await,
                }
            };

            match tokio::time::timeout(self.config.timeout, attempt_future).await {
                Err(_) => {
                    last_error = Some(SyncError::Timeout);
                }
                Ok(Err(HttpError::Offline)) => return Err(SyncError::Offline),
                Ok(Err(HttpError::Connect(message))) => {
                    last_error = Some(SyncError::transport_retryable(message));
                }
                Ok(Ok(response)) => match response.status {
                    429 => {
                        warn!("remote rate limit, engaging cooldown");
                        gate.engage_cooldown(self.config.cooldown);
                        return Err(SyncError::RateLimited);
                    }
                    413 => {
                        warn!("payload too large, engaging cooldown");
                        gate.engage_cooldown(self.config.cooldown);
                        return Err(SyncError::PayloadTooLarge);
                    }
                    status if status >= 500 => {
                        last_error = Some(SyncError::Server { status });
                    }
                    _ => return Ok(response),
                },
            }
        }

        Err(last_error.unwrap_or_else(|| SyncError::transport_fatal("no attempts made")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryConfig;
    use crate::http::MockHttpClient;
    use branchbook_model::{Transaction, TransactionKind};
    use std::time::Duration;

    fn config() -> SyncConfig {
        SyncConfig::new("https://blob.example.com")
            .with_sync_key("k1")
            .with_retry(RetryConfig::new(3, Duration::from_millis(1)))
            .with_timeout(Duration::from_millis(50))
    }

    fn dataset_with_transactions(count: usize) -> Dataset {
        let mut ds = Dataset::empty();
        for i in 0..count {
            ds.transactions.push(Transaction::new(
                "b1",
                format!("2024-01-{:02}", (i % 28) + 1),
                100,
                TransactionKind::Expense,
                "food",
            ));
        }
        ds
    }

    #[test]
    fn cap_orders_by_date_descending() {
        let ds = dataset_with_transactions(50);
        let capped = cap_for_push(&ds, 10);
        assert_eq!(capped.transactions.len(), 10);
        assert!(capped
            .transactions
            .windows(2)
            .all(|w| w[0].date >= w[1].date));
        // The input is untouched
        assert_eq!(ds.transactions.len(), 50);
    }

    #[tokio::test]
    async fn fetch_treats_missing_blob_as_none() {
        let remote = RemoteClient::new(config(), MockHttpClient::new());
        let gate = SyncGate::new();
        assert!(remote.fetch(&gate).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn fetch_treats_unparseable_body_as_none() {
        let client = MockHttpClient::new();
        client.enqueue_get(Ok(HttpResponse::new(200, "not json")));
        let remote = RemoteClient::new(config(), client);
        let gate = SyncGate::new();
        assert!(remote.fetch(&gate).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn fetch_without_key_fails() {
        let remote = RemoteClient::new(
            SyncConfig::new("https://blob.example.com"),
            MockHttpClient::new(),
        );
        let gate = SyncGate::new();
        assert!(matches!(
            remote.fetch(&gate).await,
            Err(SyncError::NoSyncKey)
        ));
    }

    #[tokio::test]
    async fn push_url_carries_key_and_namespace() {
        let client = MockHttpClient::new();
        let remote = RemoteClient::new(config(), client);
        let gate = SyncGate::new();
        remote.push(&gate, &Dataset::empty()).await.unwrap();

        let posted = remote.client.posted();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].0, "https://blob.example.com/k1/branchbook");
    }

    #[tokio::test]
    async fn push_caps_transactions() {
        let client = MockHttpClient::new();
        let remote = RemoteClient::new(config().with_cloud_transaction_cap(300), client);
        let gate = SyncGate::new();
        remote
            .push(&gate, &dataset_with_transactions(500))
            .await
            .unwrap();

        let posted = remote.client.posted();
        let pushed: Dataset = serde_json::from_str(&posted[0].1).unwrap();
        assert_eq!(pushed.transactions.len(), 300);
        assert!(pushed
            .transactions
            .windows(2)
            .all(|w| w[0].date >= w[1].date));
    }

    #[tokio::test]
    async fn offline_fails_fast_without_retry() {
        let client = MockHttpClient::new();
        client.set_online(false);
        let remote = RemoteClient::new(config(), client);
        let gate = SyncGate::new();
        assert!(matches!(remote.fetch(&gate).await, Err(SyncError::Offline)));
    }

    #[tokio::test]
    async fn transient_errors_are_retried() {
        let client = MockHttpClient::new();
        client.enqueue_get(Err(HttpError::Connect("reset".into())));
        client.enqueue_get(Ok(HttpResponse::new(404, "")));
        let remote = RemoteClient::new(config(), client);
        let gate = SyncGate::new();
        assert!(remote.fetch(&gate).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn retry_budget_is_bounded() {
        let client = MockHttpClient::new();
        for _ in 0..3 {
            client.enqueue_get(Err(HttpError::Connect("reset".into())));
        }
        let remote = RemoteClient::new(config(), client);
        let gate = SyncGate::new();
        assert!(matches!(
            remote.fetch(&gate).await,
            Err(SyncError::Transport { retryable: true, .. })
        ));
    }

    #[tokio::test]
    async fn timeout_aborts_the_attempt() {
        let client = MockHttpClient::new();
        client.set_latency(Duration::from_millis(200));
        let remote = RemoteClient::new(config(), client);
        let gate = SyncGate::new();
        assert!(matches!(remote.fetch(&gate).await, Err(SyncError::Timeout)));
    }

    #[tokio::test]
    async fn rate_limit_engages_cooldown() {
        let client = MockHttpClient::new();
        client.enqueue_get(Ok(HttpResponse::new(429, "")));
        let remote = RemoteClient::new(config(), client);
        let gate = SyncGate::new();

        assert!(matches!(
            remote.fetch(&gate).await,
            Err(SyncError::RateLimited)
        ));
        assert!(gate.cooldown_remaining().is_some());

        // Next attempt short-circuits without touching the network
        assert!(matches!(
            remote.fetch(&gate).await,
            Err(SyncError::CoolingDown { .. })
        ));
    }

    #[tokio::test]
    async fn payload_too_large_engages_cooldown() {
        let client = MockHttpClient::new();
        client.enqueue_post(Ok(HttpResponse::new(413, "")));
        let remote = RemoteClient::new(config(), client);
        let gate = SyncGate::new();

        assert!(matches!(
            remote.push(&gate, &Dataset::empty()).await,
            Err(SyncError::PayloadTooLarge)
        ));
        assert!(gate.cooldown_remaining().is_some());
    }
}

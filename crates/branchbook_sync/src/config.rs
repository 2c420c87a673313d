//! Configuration for the sync client and orchestrator.

use std::time::Duration;

/// Fixed namespace segment of the remote blob path.
///
/// The remote endpoint is `{base_url}/{sync_key}/{SYNC_NAMESPACE}`; the
/// sync key is the only secret, the namespace keeps the slot distinct from
/// anything else stored under the same key.
pub const SYNC_NAMESPACE: &str = "branchbook";

/// Configuration for sync operations.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Base URL of the remote blob host.
    pub base_url: String,
    /// Shared sync key. Without one, every cycle is skipped.
    pub sync_key: Option<String>,
    /// Per-attempt request timeout; an attempt past this deadline is
    /// aborted and counts as a failure.
    pub timeout: Duration,
    /// Retry configuration for transient failures.
    pub retry: RetryConfig,
    /// Cooldown window engaged after a rate-limit or payload-too-large
    /// response. Shared across the whole orchestrator instance.
    pub cooldown: Duration,
    /// Interval between periodic poll cycles.
    pub poll_interval: Duration,
    /// Maximum number of transactions in a pushed payload.
    pub cloud_transaction_cap: usize,
}

impl SyncConfig {
    /// Creates a configuration for the given remote host.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            sync_key: None,
            timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
            cooldown: Duration::from_secs(5 * 60),
            poll_interval: Duration::from_secs(30),
            cloud_transaction_cap: 300,
        }
    }

    /// Sets the sync key.
    #[must_use]
    pub fn with_sync_key(mut self, key: impl Into<String>) -> Self {
        self.sync_key = Some(key.into());
        self
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the retry configuration.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the cooldown window.
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Sets the periodic poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the pushed-transactions cap.
    #[must_use]
    pub fn with_cloud_transaction_cap(mut self, cap: usize) -> Self {
        self.cloud_transaction_cap = cap;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// Retry behavior for transient failures.
///
/// Retries use a fixed delay, not exponential backoff; overload is handled
/// separately by the cooldown window.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl RetryConfig {
    /// Creates a retry configuration.
    #[must_use]
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// A configuration that never retries.
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        // One attempt plus two retries
        Self::new(3, Duration::from_secs(1))
    }
}

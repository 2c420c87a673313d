//! Error types for sync operations.

use std::time::Duration;
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during a sync cycle.
///
/// None of these escape the orchestrator boundary: every variant degrades
/// to "keep the local snapshot and try again later".
#[derive(Error, Debug)]
pub enum SyncError {
    /// No network path available. Fail fast, no retry.
    #[error("device is offline")]
    Offline,

    /// An attempt exceeded its deadline and was aborted.
    #[error("request timed out")]
    Timeout,

    /// The remote signaled too many requests.
    #[error("remote rate limit hit, cooling down")]
    RateLimited,

    /// The remote rejected the payload as too large.
    #[error("remote rejected payload as too large, cooling down")]
    PayloadTooLarge,

    /// The shared cooldown window is active; no network contact was made.
    #[error("cooling down for another {remaining:?}")]
    CoolingDown {
        /// Time left in the window.
        remaining: Duration,
    },

    /// Another cycle holds the busy gate.
    #[error("a sync cycle is already in progress")]
    SyncInProgress,

    /// No sync key is configured.
    #[error("no sync key configured")]
    NoSyncKey,

    /// Transport-level failure.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
        /// Whether the attempt can be retried.
        retryable: bool,
    },

    /// The remote answered with an unexpected HTTP status.
    #[error("remote returned status {status}")]
    Server {
        /// HTTP status code.
        status: u16,
    },

    /// Local store failure while loading or saving a snapshot.
    #[error("local store error: {0}")]
    Store(String),
}

impl SyncError {
    /// Creates a retryable transport error.
    pub fn transport_retryable(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a non-retryable transport error.
    pub fn transport_fatal(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: false,
        }
    }

    /// Returns true if another attempt may succeed within this cycle.
    ///
    /// Rate-limit and payload errors are deliberately not retryable: they
    /// engage the cooldown instead.
    pub fn is_retryable(&self) -> bool {
        match self {
            SyncError::Timeout => true,
            SyncError::Transport { retryable, .. } => *retryable,
            SyncError::Server { status } => *status >= 500,
            _ => false,
        }
    }
}

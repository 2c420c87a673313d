//! Per-device sync gating state.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Shared mutable sync state for one device: the busy flag that keeps
/// cycles from overlapping and the cooldown window engaged after remote
/// overload responses.
///
/// The gate is owned by its orchestrator instance, not process-global, so
/// tests can run many orchestrators without cross-contamination.
#[derive(Debug, Default)]
pub struct SyncGate {
    busy: AtomicBool,
    cooldown_until: Mutex<Option<Instant>>,
}

impl SyncGate {
    /// Creates an idle gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tries to claim the gate for a sync cycle.
    ///
    /// Returns `None` if a cycle is already in flight. The returned guard
    /// releases the gate on drop. Best-effort only: contenders are not
    /// queued.
    pub fn try_begin(&self) -> Option<SyncGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SyncGuard { gate: self })
    }

    /// Returns true if a cycle is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Starts (or extends) the cooldown window.
    pub fn engage_cooldown(&self, window: Duration) {
        let until = Instant::now() + window;
        let mut guard = self.cooldown_until.lock();
        match *guard {
            Some(existing) if existing >= until => {}
            _ => *guard = Some(until),
        }
    }

    /// Time left in the cooldown window, if one is active.
    pub fn cooldown_remaining(&self) -> Option<Duration> {
        let mut guard = self.cooldown_until.lock();
        match *guard {
            Some(until) => {
                let now = Instant::now();
                if until > now {
                    Some(until - now)
                } else {
                    *guard = None;
                    None
                }
            }
            None => None,
        }
    }

    /// Clears the cooldown window.
    pub fn clear_cooldown(&self) {
        *self.cooldown_until.lock() = None;
    }
}

/// RAII claim on a [`SyncGate`]; releases the busy flag on drop.
#[derive(Debug)]
pub struct SyncGuard<'a> {
    gate: &'a SyncGate,
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

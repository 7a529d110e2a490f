//! Check Rate Limit use case
//!
//! Owns the process-wide admission table. One instance is built at start
//! and shared (behind an `Arc`) by every request handler; tests build their
//! own isolated instances.

use crate::ports::clock::Clock;
use niagate_domain::{ClientKey, RateLimitDecision, RateLimitPolicy, RateLimitTable};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// Per-client fixed-window rate limiter.
///
/// The lock is held only for the in-memory check, never across an
/// `.await`, so a plain `std::sync::Mutex` is enough.
pub struct RateLimiter {
    table: Mutex<RateLimitTable>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(policy: RateLimitPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            table: Mutex::new(RateLimitTable::new(policy)),
            clock,
        }
    }

    pub fn policy(&self) -> RateLimitPolicy {
        *self.lock().policy()
    }

    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Admit or reject one request from `key`. Never fails.
    pub fn check(&self, key: &ClientKey) -> RateLimitDecision {
        let now = self.clock.now();
        let decision = self.lock().check(key.as_str(), now);

        if decision.allowed {
            debug!(
                client = %key,
                remaining = decision.remaining,
                "Rate limit: admitted"
            );
        } else {
            info!(
                client = %key,
                reset_at = %decision.reset_at,
                "Rate limit: rejected"
            );
        }
        decision
    }

    /// Drop every expired window now, regardless of the sweep interval.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let removed = self.lock().sweep(now);
        if removed > 0 {
            debug!("Rate limit sweep removed {} expired entries", removed);
        }
        removed
    }

    /// Number of tracked clients
    pub fn tracked_clients(&self) -> usize {
        self.lock().len()
    }

    // The table has no cross-entry invariants, so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, RateLimitTable> {
        self.table.lock().unwrap_or_else(|e| e.into_inner())
    }
}

//! Fixed-window rate limit table

use super::entities::{RateLimitDecision, RateLimitEntry};
use super::policy::RateLimitPolicy;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Table of per-client windows plus the admission algorithm.
///
/// The table does not synchronize itself; the owner decides how it is
/// shared (the application layer keeps it behind a mutex).
#[derive(Debug, Clone)]
pub struct RateLimitTable {
    policy: RateLimitPolicy,
    entries: HashMap<String, RateLimitEntry>,
    last_sweep: Option<DateTime<Utc>>,
}

impl RateLimitTable {
    pub fn new(policy: RateLimitPolicy) -> Self {
        Self {
            policy,
            entries: HashMap::new(),
            last_sweep: None,
        }
    }

    pub fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }

    /// Decide whether `key` may make another request at `now`.
    ///
    /// Runs the expiry sweep first when the sweep interval has elapsed.
    pub fn check(&mut self, key: &str, now: DateTime<Utc>) -> RateLimitDecision {
        self.maybe_sweep(now);

        let limit = self.policy.max_requests;
        match self.entries.get_mut(key) {
            Some(entry) if !entry.is_expired(now) => {
                if entry.count < limit {
                    entry.count += 1;
                    RateLimitDecision {
                        allowed: true,
                        remaining: limit - entry.count,
                        reset_at: entry.reset_at,
                        limit,
                    }
                } else {
                    RateLimitDecision {
                        allowed: false,
                        remaining: 0,
                        reset_at: entry.reset_at,
                        limit,
                    }
                }
            }
            _ => {
                let reset_at = now
                    .checked_add_signed(self.policy.window())
                    .unwrap_or(DateTime::<Utc>::MAX_UTC);
                self.entries
                    .insert(key.to_string(), RateLimitEntry::new(reset_at));
                RateLimitDecision {
                    allowed: true,
                    remaining: limit.saturating_sub(1),
                    reset_at,
                    limit,
                }
            }
        }
    }

    /// Remove every entry whose window has passed. Returns how many were removed.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        self.last_sweep = Some(now);
        before - self.entries.len()
    }

    /// Sweep if none has run yet or the last one is older than the interval.
    fn maybe_sweep(&mut self, now: DateTime<Utc>) -> usize {
        let due = match self.last_sweep {
            None => true,
            Some(last) => now - last >= self.policy.sweep_interval(),
        };
        if due { self.sweep(now) } else { 0 }
    }

    pub fn entry(&self, key: &str) -> Option<&RateLimitEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

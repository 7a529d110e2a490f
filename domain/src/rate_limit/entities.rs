//! Rate limit entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-client admission state for the current window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitEntry {
    /// Requests admitted in the current window
    pub count: u32,
    /// End of the current window
    pub reset_at: DateTime<Utc>,
}

impl RateLimitEntry {
    pub fn new(reset_at: DateTime<Utc>) -> Self {
        Self { count: 1, reset_at }
    }

    /// A window is over once `now` reaches `reset_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.reset_at
    }
}

/// Outcome of one admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
    /// Ceiling the decision was made against
    pub limit: u32,
}

impl RateLimitDecision {
    /// Whole seconds until the window resets, never less than one.
    ///
    /// Used for the `Retry-After` header, where zero would invite an
    /// immediate retry that is still inside the window.
    pub fn retry_after_secs(&self, now: DateTime<Utc>) -> u64 {
        let millis = (self.reset_at - now).num_milliseconds().max(0) as u64;
        millis.div_ceil(1000).max(1)
    }
}

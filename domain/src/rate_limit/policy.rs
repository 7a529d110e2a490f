//! Rate limit policy value object

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Default window length: one minute.
pub const DEFAULT_WINDOW_MS: u64 = 60_000;
/// Default number of admitted requests per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 10;
/// Default minimum spacing between expiry sweeps: five minutes.
pub const DEFAULT_SWEEP_INTERVAL_MS: u64 = 300_000;

/// Fixed-window admission policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitPolicy {
    /// Window length in milliseconds
    pub window_ms: u64,
    /// Ceiling of admitted requests per key per window
    pub max_requests: u32,
    /// Minimum time between two expiry sweeps, in milliseconds
    pub sweep_interval_ms: u64,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_WINDOW_MS,
            max_requests: DEFAULT_MAX_REQUESTS,
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
        }
    }
}

impl RateLimitPolicy {
    pub fn new(window_ms: u64, max_requests: u32) -> Self {
        Self {
            window_ms,
            max_requests,
            ..Self::default()
        }
    }

    pub fn with_sweep_interval_ms(mut self, sweep_interval_ms: u64) -> Self {
        self.sweep_interval_ms = sweep_interval_ms;
        self
    }

    pub fn window(&self) -> TimeDelta {
        millis(self.window_ms)
    }

    pub fn sweep_interval(&self) -> TimeDelta {
        millis(self.sweep_interval_ms)
    }
}

fn millis(ms: u64) -> TimeDelta {
    TimeDelta::try_milliseconds(i64::try_from(ms).unwrap_or(i64::MAX)).unwrap_or(TimeDelta::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = RateLimitPolicy::default();
        assert_eq!(policy.window(), TimeDelta::seconds(60));
        assert_eq!(policy.max_requests, 10);
        assert_eq!(policy.sweep_interval(), TimeDelta::minutes(5));
    }

    #[test]
    fn test_huge_window_saturates() {
        let policy = RateLimitPolicy::new(u64::MAX, 1);
        assert_eq!(policy.window(), TimeDelta::MAX);
    }
}

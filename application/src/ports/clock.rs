//! Clock port
//!
//! Time source for the rate limiter. Injected so tests can advance time
//! without sleeping.

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

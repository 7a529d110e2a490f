//! Application-level configuration.
//!
//! Assembled once at process start (by the infrastructure config loader)
//! and passed by reference to the use cases that need it.

use niagate_domain::{RateLimitPolicy, SourceCatalog};

/// Configuration consumed by the use cases.
#[derive(Debug, Clone, Default)]
pub struct ProxyConfig {
    /// Sources the tool proxy may address
    pub sources: SourceCatalog,
    /// Admission policy for the rate limiter
    pub rate_limit: RateLimitPolicy,
}

impl ProxyConfig {
    pub fn new(sources: SourceCatalog, rate_limit: RateLimitPolicy) -> Self {
        Self {
            sources,
            rate_limit,
        }
    }
}

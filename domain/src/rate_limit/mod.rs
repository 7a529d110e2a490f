//! Rate limit domain module
//!
//! Fixed-window admission control keyed by client identity. Everything here
//! is pure: callers pass the current time in, so the table can be driven by
//! any clock (wall clock in production, a manual clock in tests).
//!
//! ```text
//! ClientKey ──▶ RateLimitTable::check(key, now) ──▶ RateLimitDecision
//!                     │
//!                     └─ sweep(now) drops entries whose window has passed
//! ```
//!
//! # Key Types
//!
//! - [`RateLimitPolicy`]: window length, ceiling and sweep interval
//! - [`RateLimitEntry`]: per-client counter for the current window
//! - [`RateLimitDecision`]: admit/reject result handed back to the caller
//! - [`RateLimitTable`]: the table of entries plus the admission algorithm
//! - [`ClientKey`]: identity derived from forwarding headers or the peer address

pub mod client_key;
pub mod entities;
pub mod policy;
pub mod table;

pub use client_key::ClientKey;
pub use entities::{RateLimitDecision, RateLimitEntry};
pub use policy::RateLimitPolicy;
pub use table::RateLimitTable;

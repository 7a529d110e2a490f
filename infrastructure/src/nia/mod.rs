//! Nia search API adapter
//!
//! [`NiaClient`] implements the application's search port over HTTP. Wire
//! schemas live in [`wire`] and never leave this module.

mod client;
pub mod wire;

pub use client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, NiaClient};

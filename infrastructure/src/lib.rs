//! Infrastructure layer for niagate
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Nia API client, the system clock, the
//! tool schema converter, and configuration file loading.

pub mod clock;
pub mod config;
pub mod nia;
pub mod tools;

// Re-export commonly used types
pub use clock::SystemClock;
pub use config::{ConfigError, ConfigLoader, ConfigSource, FileConfig};
pub use nia::NiaClient;
pub use tools::JsonSchemaToolConverter;

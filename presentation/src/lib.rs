//! Presentation layer for niagate
//!
//! This crate contains the HTTP surface (router, admission middleware,
//! handlers), the CLI definitions and console output formatting.

pub mod cli;
pub mod output;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{Cli, Command};
pub use output::console::ConsoleFormatter;
pub use server::{AppState, Maintenance, create_router, serve};

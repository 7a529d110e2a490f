//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod check_rate_limit;
pub mod run_tool;

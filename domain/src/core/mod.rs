//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: small string helpers used for log previews

pub mod error;
pub mod string;

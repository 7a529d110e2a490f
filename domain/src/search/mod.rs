//! Search option value objects
//!
//! Typed, already-clamped options for the pattern search and web search
//! tools. Range limits live here so that out-of-range values are corrected
//! once, before any request body exists.

pub mod grep;
pub mod web;

pub use grep::{GrepOptions, GrepOutputMode};
pub use web::{WebCategory, WebSearchOptions};

/// Inclusive bounds for an integer option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: u32,
    pub max: u32,
}

impl Bounds {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Clamp a possibly negative or oversized request into range.
    pub fn clamp(&self, value: i64) -> u32 {
        value.clamp(i64::from(self.min), i64::from(self.max)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_clamp() {
        let bounds = Bounds::new(1, 1000);
        assert_eq!(bounds.clamp(5000), 1000);
        assert_eq!(bounds.clamp(0), 1);
        assert_eq!(bounds.clamp(-7), 1);
        assert_eq!(bounds.clamp(42), 42);
    }
}

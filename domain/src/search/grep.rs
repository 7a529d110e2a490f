//! Pattern search options

use super::Bounds;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_MATCHES_PER_FILE: Bounds = Bounds::new(1, 100);
pub const MAX_TOTAL_MATCHES: Bounds = Bounds::new(1, 1000);
pub const CONTEXT_LINES: Bounds = Bounds::new(0, 10);
pub const LINES_BEFORE_AFTER: Bounds = Bounds::new(0, 20);

/// What a pattern search reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrepOutputMode {
    /// Matching lines with optional context
    #[default]
    Content,
    /// Only the paths of files with at least one match
    FilesWithMatches,
    /// Match counts per file
    Count,
}

impl GrepOutputMode {
    pub const ALL: [GrepOutputMode; 3] = [
        GrepOutputMode::Content,
        GrepOutputMode::FilesWithMatches,
        GrepOutputMode::Count,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GrepOutputMode::Content => "content",
            GrepOutputMode::FilesWithMatches => "files_with_matches",
            GrepOutputMode::Count => "count",
        }
    }
}

impl fmt::Display for GrepOutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrepOutputMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| {
                DomainError::InvalidArgument(format!(
                    "output_mode must be one of: content, files_with_matches, count (got '{}')",
                    s
                ))
            })
    }
}

/// Options for one pattern search. Unset fields are left to the upstream
/// defaults; numeric fields are clamped on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrepOptions {
    pub pattern: String,
    /// Path prefix filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whole_word: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_string: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_matches_per_file: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_total_matches: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_mode: Option<GrepOutputMode>,
    /// Symmetric context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_lines: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_before: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_after: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
    /// Scan every file instead of the approximate index-backed search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exhaustive: Option<bool>,
}

impl GrepOptions {
    pub fn new(pattern: impl Into<String>) -> Result<Self, DomainError> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(DomainError::InvalidArgument(
                "pattern must not be empty".to_string(),
            ));
        }
        Ok(Self {
            pattern,
            path: None,
            case_sensitive: None,
            whole_word: None,
            fixed_string: None,
            max_matches_per_file: None,
            max_total_matches: None,
            output_mode: None,
            context_lines: None,
            lines_before: None,
            lines_after: None,
            highlight: None,
            exhaustive: None,
        })
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.path = (!path.trim().is_empty()).then_some(path);
        self
    }

    pub fn with_max_matches_per_file(mut self, value: i64) -> Self {
        self.max_matches_per_file = Some(MAX_MATCHES_PER_FILE.clamp(value));
        self
    }

    pub fn with_max_total_matches(mut self, value: i64) -> Self {
        self.max_total_matches = Some(MAX_TOTAL_MATCHES.clamp(value));
        self
    }

    pub fn with_context_lines(mut self, value: i64) -> Self {
        self.context_lines = Some(CONTEXT_LINES.clamp(value));
        self
    }

    pub fn with_lines_before(mut self, value: i64) -> Self {
        self.lines_before = Some(LINES_BEFORE_AFTER.clamp(value));
        self
    }

    pub fn with_lines_after(mut self, value: i64) -> Self {
        self.lines_after = Some(LINES_BEFORE_AFTER.clamp(value));
        self
    }

    pub fn with_output_mode(mut self, mode: GrepOutputMode) -> Self {
        self.output_mode = Some(mode);
        self
    }

    /// Whether `file_path` passes the path prefix filter (always true without one).
    pub fn matches_path(&self, file_path: &str) -> bool {
        match self.path.as_deref() {
            None => true,
            Some(prefix) => {
                let prefix = prefix.trim_start_matches('/');
                file_path.trim_start_matches('/').starts_with(prefix)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps_are_clamped() {
        let options = GrepOptions::new("foo")
            .unwrap()
            .with_max_total_matches(5000)
            .with_max_matches_per_file(0)
            .with_context_lines(50)
            .with_lines_before(-3)
            .with_lines_after(21);

        assert_eq!(options.max_total_matches, Some(1000));
        assert_eq!(options.max_matches_per_file, Some(1));
        assert_eq!(options.context_lines, Some(10));
        assert_eq!(options.lines_before, Some(0));
        assert_eq!(options.lines_after, Some(20));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert!(GrepOptions::new("").is_err());
    }

    #[test]
    fn test_unset_options_are_not_serialized() {
        let options = GrepOptions::new("foo").unwrap();
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json, serde_json::json!({"pattern": "foo"}));
    }

    #[test]
    fn test_path_filter() {
        let options = GrepOptions::new("foo").unwrap().with_path("/net/http");
        assert!(options.matches_path("net/http/client.cc"));
        assert!(options.matches_path("/net/http/server.cc"));
        assert!(!options.matches_path("base/net/http.cc"));
        assert!(GrepOptions::new("foo").unwrap().matches_path("anything"));
    }

    #[test]
    fn test_output_mode_parse() {
        assert_eq!(
            "files_with_matches".parse::<GrepOutputMode>().unwrap(),
            GrepOutputMode::FilesWithMatches
        );
        let err = "lines".parse::<GrepOutputMode>().unwrap_err();
        assert!(err.to_string().contains("content, files_with_matches, count"));
    }
}

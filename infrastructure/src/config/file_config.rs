//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Environment overrides are merged into the same shape by the loader.

use super::de;
use crate::nia::DEFAULT_BASE_URL;
use niagate_application::ProxyConfig;
use niagate_domain::rate_limit::policy::{
    DEFAULT_MAX_REQUESTS, DEFAULT_SWEEP_INTERVAL_MS, DEFAULT_WINDOW_MS,
};
use niagate_domain::{RateLimitPolicy, SourceCatalog, Subtree};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const REDACTED: &str = "********";

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Upstream API settings
    pub api: FileApiConfig,
    /// Configured sources
    pub sources: FileSourcesConfig,
    /// Repository exposed as named subtrees
    pub subtree: FileSubtreeConfig,
    /// Admission policy
    pub rate_limit: FileRateLimitConfig,
    /// HTTP surface
    pub server: FileServerConfig,
    /// Log output
    pub logging: FileLoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    pub base_url: String,
    #[serde(deserialize_with = "de::opt_string", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Credential of the LLM gateway used by the chat endpoint.
    /// Loaded and redacted here; niagate itself never calls the gateway.
    #[serde(deserialize_with = "de::opt_string", skip_serializing_if = "Option::is_none")]
    pub gateway_api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            gateway_api_key: None,
            timeout_seconds: 60,
        }
    }
}

impl FileApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSourcesConfig {
    #[serde(deserialize_with = "de::opt_string", skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(deserialize_with = "de::string_list")]
    pub archive: Vec<String>,
    #[serde(deserialize_with = "de::string_list")]
    pub biography: Vec<String>,
    #[serde(deserialize_with = "de::string_list")]
    pub docs: Vec<String>,
    #[serde(deserialize_with = "de::string_list")]
    pub repositories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSubtreeConfig {
    pub org: String,
    pub dataset: String,
    pub branch: String,
    #[serde(deserialize_with = "de::string_list")]
    pub scopes: Vec<String>,
}

impl Default for FileSubtreeConfig {
    fn default() -> Self {
        Self {
            org: String::new(),
            dataset: String::new(),
            branch: "main".to_string(),
            scopes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRateLimitConfig {
    pub window_ms: u64,
    pub max_requests: u32,
    pub sweep_interval_ms: u64,
}

impl Default for FileRateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_WINDOW_MS,
            max_requests: DEFAULT_MAX_REQUESTS,
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub bind: String,
    #[serde(deserialize_with = "de::flag")]
    pub maintenance: bool,
    pub retry_after_seconds: u64,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            maintenance: false,
            retry_after_seconds: 300,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Daily-rotated log file; stderr only when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// A configuration problem found after merging all sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl FileConfig {
    /// Validate the merged configuration, returning every issue found.
    ///
    /// Missing credentials and empty source lists are not issues here: they
    /// are reported by the tool that needs them.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let mut push = |field, message: &str| {
            issues.push(ConfigIssue {
                field,
                message: message.to_string(),
            })
        };

        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://"))
        {
            push("api.base_url", "must be an http(s) URL");
        }
        if self.api.timeout_seconds == 0 {
            push("api.timeout_seconds", "must be greater than 0");
        }
        if self.rate_limit.window_ms == 0 {
            push("rate_limit.window_ms", "must be greater than 0");
        }
        if self.rate_limit.max_requests == 0 {
            push("rate_limit.max_requests", "must be greater than 0");
        }
        if !self.subtree.scopes.is_empty() {
            if self.subtree.org.trim().is_empty() {
                push("subtree.org", "is required when subtree.scopes is set");
            }
            if self.subtree.dataset.trim().is_empty() {
                push("subtree.dataset", "is required when subtree.scopes is set");
            }
            if self.subtree.branch.trim().is_empty() {
                push("subtree.branch", "is required when subtree.scopes is set");
            }
        }
        issues
    }

    pub fn source_catalog(&self) -> SourceCatalog {
        let mut catalog = SourceCatalog::new()
            .with_archive(self.sources.archive.iter().cloned())
            .with_biography(self.sources.biography.iter().cloned())
            .with_docs(self.sources.docs.iter().cloned())
            .with_repositories(self.sources.repositories.iter().cloned());
        if let Some(id) = &self.sources.source_id {
            catalog = catalog.with_source_id(id.clone());
        }
        if !self.subtree.scopes.is_empty() {
            catalog = catalog.with_subtree(Subtree {
                org: self.subtree.org.clone(),
                dataset: self.subtree.dataset.clone(),
                branch: self.subtree.branch.clone(),
                scopes: self.subtree.scopes.clone(),
            });
        }
        catalog
    }

    pub fn rate_limit_policy(&self) -> RateLimitPolicy {
        RateLimitPolicy::new(self.rate_limit.window_ms, self.rate_limit.max_requests)
            .with_sweep_interval_ms(self.rate_limit.sweep_interval_ms)
    }

    /// Application-level view of this configuration.
    pub fn to_proxy_config(&self) -> ProxyConfig {
        ProxyConfig::new(self.source_catalog(), self.rate_limit_policy())
    }

    /// Copy with every credential masked, for display.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        let mask = |key: &mut Option<String>| {
            if key.is_some() {
                *key = Some(REDACTED.to_string());
            }
        };
        mask(&mut copy.api.api_key);
        mask(&mut copy.api.gateway_api_key);
        copy
    }
}

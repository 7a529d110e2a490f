//! Configuration loading for niagate
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables (`NIA_API_KEY`, `NIA_ARCHIVE_SOURCES`, ...)
//! 2. `--config <path>` specified file
//! 3. Project root: `./niagate.toml` or `./.niagate.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/niagate/config.toml`
//! 5. Default values

mod de;
mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileApiConfig, FileConfig, FileLoggingConfig, FileRateLimitConfig,
    FileServerConfig, FileSourcesConfig, FileSubtreeConfig,
};
pub use loader::{ConfigError, ConfigLoader, ConfigSource, ENV_OVERRIDES};

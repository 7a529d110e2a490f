//! Configuration file loader with multi-source merging

use super::file_config::{ConfigIssue, FileConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "niagate";
const PROJECT_FILES: [&str; 2] = ["niagate.toml", ".niagate.toml"];

/// Environment variables and the config keys they override.
pub const ENV_OVERRIDES: [(&str, &str); 10] = [
    ("NIA_API_KEY", "api.api_key"),
    ("NIA_BASE_URL", "api.base_url"),
    ("AI_GATEWAY_API_KEY", "api.gateway_api_key"),
    ("NIA_SOURCE_ID", "sources.source_id"),
    ("NIA_ARCHIVE_SOURCES", "sources.archive"),
    ("NIA_BIO_SOURCES", "sources.biography"),
    ("NIA_DOC_SOURCES", "sources.docs"),
    ("NIA_REPOSITORIES", "sources.repositories"),
    ("NIA_SUBTREE_SCOPES", "subtree.scopes"),
    ("MAINTENANCE_MODE", "server.maintenance"),
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error(transparent)]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {}", join_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Where one configuration layer comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub label: &'static str,
    pub path: PathBuf,
    pub found: bool,
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (see [`ENV_OVERRIDES`])
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./niagate.toml` or `./.niagate.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/niagate/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        let config: FileConfig = Self::figment(config_path)?
            .extract()
            .map_err(Box::new)?;

        let issues = config.validate();
        if !issues.is_empty() {
            return Err(ConfigError::Invalid(issues));
        }
        Ok(config)
    }

    /// The merged provider stack, before extraction.
    pub fn figment(config_path: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment.merge(Self::env()))
    }

    /// Environment overrides mapped onto nested config keys.
    fn env() -> Env {
        let vars = ENV_OVERRIDES.map(|(var, _)| var);
        Env::raw().only(&vars).map(|key| {
            ENV_OVERRIDES
                .iter()
                .find(|(var, _)| key.as_str().eq_ignore_ascii_case(var))
                .map(|(_, path)| (*path).into())
                .unwrap_or_else(|| key.into())
        })
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/niagate/config.toml if set,
    /// otherwise falls back to ~/.config/niagate/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// The file layers in priority order, lowest first.
    pub fn sources(config_path: Option<&Path>) -> Vec<ConfigSource> {
        let mut sources = Vec::new();
        if let Some(path) = Self::global_config_path() {
            sources.push(ConfigSource {
                label: "Global",
                found: path.exists(),
                path,
            });
        }
        let project = Self::project_config_path();
        sources.push(ConfigSource {
            label: "Project",
            found: project.is_some(),
            path: project.unwrap_or_else(|| PathBuf::from(PROJECT_FILES[0])),
        });
        if let Some(path) = config_path {
            sources.push(ConfigSource {
                label: "Explicit",
                found: path.exists(),
                path: path.to_path_buf(),
            });
        }
        sources
    }

    /// Environment variables from [`ENV_OVERRIDES`] that are currently set.
    pub fn active_env_overrides() -> Vec<&'static str> {
        ENV_OVERRIDES
            .iter()
            .map(|(var, _)| *var)
            .filter(|var| std::env::var_os(var).is_some())
            .collect()
    }
}

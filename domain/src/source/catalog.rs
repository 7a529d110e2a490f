//! Configured sources and source identifier resolution

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which family of upstream endpoints a source is served by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// `/data-sources/{id}/...` (document archives, websites)
    DataSource,
    /// `/repositories/{id}/...` (code indexes and repository subtrees)
    Repository,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::DataSource => "data_source",
            SourceKind::Repository => "repository",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved source: endpoint family plus upstream identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTarget {
    pub kind: SourceKind,
    pub id: String,
}

impl SourceTarget {
    pub fn data_source(id: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::DataSource,
            id: id.into(),
        }
    }

    pub fn repository(id: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Repository,
            id: id.into(),
        }
    }
}

/// A repository indexed once and exposed as named subtrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtree {
    pub org: String,
    pub dataset: String,
    pub branch: String,
    pub scopes: Vec<String>,
}

impl Subtree {
    /// `<org>/<dataset>`, the whole indexed repository.
    pub fn root(&self) -> String {
        format!("{}/{}", self.org, self.dataset)
    }

    /// `<org>/<dataset>/tree/<branch>/<scope>`
    pub fn composite_id(&self, scope: &str) -> String {
        format!("{}/{}/tree/{}/{}", self.org, self.dataset, self.branch, scope)
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

/// Every source a deployment is configured with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCatalog {
    /// Single primary data source (single-source deployments)
    pub source_id: Option<String>,
    /// Document archive data sources
    pub archive: Vec<String>,
    /// Biographical data sources
    pub biography: Vec<String>,
    /// Documentation data sources (searched only on request)
    pub docs: Vec<String>,
    /// Indexed repositories
    pub repositories: Vec<String>,
    /// Subtree-style deployment of one large repository
    pub subtree: Option<Subtree>,
}

impl SourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_id(mut self, id: impl Into<String>) -> Self {
        self.source_id = Some(id.into());
        self
    }

    pub fn with_archive(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.archive = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_biography(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.biography = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_docs(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.docs = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_repositories(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.repositories = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_subtree(mut self, subtree: Subtree) -> Self {
        self.subtree = Some(subtree);
        self
    }

    /// All data sources in default-selection order.
    pub fn data_sources(&self) -> Vec<&str> {
        self.source_id
            .iter()
            .chain(&self.archive)
            .chain(&self.biography)
            .chain(&self.docs)
            .map(String::as_str)
            .collect()
    }

    /// Subtree scope names, in configuration order.
    pub fn subtree_scopes(&self) -> &[String] {
        self.subtree.as_ref().map(|s| s.scopes.as_slice()).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.data_sources().is_empty()
            && self.repositories.is_empty()
            && self.subtree.is_none()
    }

    /// Resolve an optional source identifier for tools that accept both
    /// data sources and repositories.
    ///
    /// Without an identifier the first data source is used, then the first
    /// repository, then the first subtree scope.
    pub fn resolve_source(&self, source: Option<&str>) -> Result<SourceTarget, DomainError> {
        let Some(requested) = source.map(str::trim).filter(|s| !s.is_empty()) else {
            return self.default_source();
        };

        if self.data_sources().contains(&requested) {
            return Ok(SourceTarget::data_source(requested));
        }
        if self.repositories.iter().any(|r| r == requested) {
            return Ok(SourceTarget::repository(requested));
        }
        if let Some(subtree) = &self.subtree {
            if subtree.has_scope(requested) {
                return Ok(SourceTarget::repository(subtree.composite_id(requested)));
            }
            if subtree.root() == requested {
                return Ok(SourceTarget::repository(requested));
            }
        }

        Err(DomainError::UnknownSource {
            source_id: requested.to_string(),
            configured: self.known_identifiers(),
        })
    }

    /// Resolve an optional identifier that must name a data source.
    pub fn resolve_data_source(&self, source: Option<&str>) -> Result<SourceTarget, DomainError> {
        let data_sources = self.data_sources();
        match source.map(str::trim).filter(|s| !s.is_empty()) {
            None => data_sources
                .first()
                .map(|id| SourceTarget::data_source(*id))
                .ok_or_else(|| DomainError::NoSourcesConfigured("data sources".to_string())),
            Some(requested) if data_sources.contains(&requested) => {
                Ok(SourceTarget::data_source(requested))
            }
            Some(requested) => Err(DomainError::UnknownSource {
                source_id: requested.to_string(),
                configured: data_sources.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }

    fn default_source(&self) -> Result<SourceTarget, DomainError> {
        if let Some(id) = self.data_sources().first() {
            return Ok(SourceTarget::data_source(*id));
        }
        if let Some(id) = self.repositories.first() {
            return Ok(SourceTarget::repository(id.clone()));
        }
        if let Some(subtree) = &self.subtree {
            return Ok(match subtree.scopes.first() {
                Some(scope) => SourceTarget::repository(subtree.composite_id(scope)),
                None => SourceTarget::repository(subtree.root()),
            });
        }
        Err(DomainError::NoSourcesConfigured("any tool".to_string()))
    }

    /// Every identifier [`resolve_source`](Self::resolve_source) accepts.
    pub fn known_identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.data_sources().iter().map(|s| s.to_string()).collect();
        ids.extend(self.repositories.iter().cloned());
        ids.extend(self.subtree_scopes().iter().cloned());
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chromium() -> Subtree {
        Subtree {
            org: "chromium".to_string(),
            dataset: "chromium".to_string(),
            branch: "main".to_string(),
            scopes: vec!["base".to_string(), "net".to_string()],
        }
    }

    #[test]
    fn test_composite_id() {
        assert_eq!(chromium().composite_id("net"), "chromium/chromium/tree/main/net");
        assert_eq!(chromium().root(), "chromium/chromium");
    }

    #[test]
    fn test_default_source_prefers_data_sources() {
        let catalog = SourceCatalog::new()
            .with_archive(["arch-1", "arch-2"])
            .with_repositories(["owner/repo"]);
        assert_eq!(
            catalog.resolve_source(None).unwrap(),
            SourceTarget::data_source("arch-1")
        );

        let repos_only = SourceCatalog::new().with_repositories(["owner/repo"]);
        assert_eq!(
            repos_only.resolve_source(None).unwrap(),
            SourceTarget::repository("owner/repo")
        );
    }

    #[test]
    fn test_source_id_comes_first() {
        let catalog = SourceCatalog::new()
            .with_source_id("primary")
            .with_archive(["arch-1"]);
        assert_eq!(catalog.data_sources(), vec!["primary", "arch-1"]);
    }

    #[test]
    fn test_subtree_scope_resolves_to_composite() {
        let catalog = SourceCatalog::new().with_subtree(chromium());
        assert_eq!(
            catalog.resolve_source(Some("net")).unwrap(),
            SourceTarget::repository("chromium/chromium/tree/main/net")
        );
        assert_eq!(
            catalog.resolve_source(None).unwrap(),
            SourceTarget::repository("chromium/chromium/tree/main/base")
        );
    }

    #[test]
    fn test_unknown_source_lists_configured() {
        let catalog = SourceCatalog::new()
            .with_archive(["arch-1"])
            .with_subtree(chromium());
        let err = catalog.resolve_source(Some("nope")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("nope"));
        assert!(message.contains("arch-1"));
        assert!(message.contains("net"));
    }

    #[test]
    fn test_empty_catalog_is_configuration_error() {
        let err = SourceCatalog::new().resolve_source(None).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_resolve_data_source_rejects_repositories() {
        let catalog = SourceCatalog::new()
            .with_docs(["docs-1"])
            .with_repositories(["owner/repo"]);
        assert_eq!(
            catalog.resolve_data_source(None).unwrap(),
            SourceTarget::data_source("docs-1")
        );
        assert!(matches!(
            catalog.resolve_data_source(Some("owner/repo")),
            Err(DomainError::UnknownSource { .. })
        ));

        let repos_only = SourceCatalog::new().with_repositories(["owner/repo"]);
        assert!(repos_only.resolve_data_source(None).unwrap_err().is_configuration());
    }
}

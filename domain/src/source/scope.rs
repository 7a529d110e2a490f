//! Search scope resolution

use super::catalog::SourceCatalog;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category names a search can be narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCategory {
    Archive,
    Biography,
    Docs,
    Repositories,
    All,
}

impl SourceCategory {
    pub const ALL: [SourceCategory; 5] = [
        SourceCategory::Archive,
        SourceCategory::Biography,
        SourceCategory::Docs,
        SourceCategory::Repositories,
        SourceCategory::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceCategory::Archive => "archive",
            SourceCategory::Biography => "biography",
            SourceCategory::Docs => "docs",
            SourceCategory::Repositories => "repositories",
            SourceCategory::All => "all",
        }
    }
}

impl fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// Upstream identifiers a semantic search runs against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTargets {
    pub data_sources: Vec<String>,
    pub repositories: Vec<String>,
}

impl SearchTargets {
    pub fn is_empty(&self) -> bool {
        self.data_sources.is_empty() && self.repositories.is_empty()
    }

    fn push_data_sources<'a>(&mut self, ids: impl IntoIterator<Item = &'a String>) {
        for id in ids {
            if !self.data_sources.contains(id) {
                self.data_sources.push(id.clone());
            }
        }
    }

    fn push_repositories<'a>(&mut self, ids: impl IntoIterator<Item = &'a String>) {
        for id in ids {
            if !self.repositories.contains(id) {
                self.repositories.push(id.clone());
            }
        }
    }
}

impl SourceCatalog {
    fn category_sources(&self, category: SourceCategory) -> usize {
        match category {
            SourceCategory::Archive => self.archive.len(),
            SourceCategory::Biography => self.biography.len(),
            SourceCategory::Docs => self.docs.len(),
            SourceCategory::Repositories => self.repositories.len(),
            // Docs only join `all` through `include_docs`.
            SourceCategory::All => {
                self.source_id.iter().count()
                    + self.archive.len()
                    + self.biography.len()
                    + self.repositories.len()
                    + usize::from(self.subtree.is_some())
            }
        }
    }

    /// Scopes a search accepts: configured categories, then subtree names.
    pub fn valid_scopes(&self) -> Vec<String> {
        let mut scopes: Vec<String> = SourceCategory::ALL
            .into_iter()
            .filter(|c| self.category_sources(*c) > 0)
            .map(|c| c.as_str().to_string())
            .collect();
        scopes.extend(self.subtree_scopes().iter().cloned());
        scopes
    }

    /// Map an optional scope to the identifiers a search runs against.
    ///
    /// Documentation sources join a search only when `include_docs` is set
    /// or the scope is `docs` itself. Unknown scopes fail with the list of
    /// valid ones; an empty result is a configuration error.
    pub fn resolve_scope(
        &self,
        scope: Option<&str>,
        include_docs: bool,
    ) -> Result<SearchTargets, DomainError> {
        let scope = scope.map(str::trim).filter(|s| !s.is_empty());
        let mut targets = SearchTargets::default();

        match scope {
            None => self.push_everything(&mut targets),
            Some(name) => {
                if let Some(subtree) = self.subtree.as_ref().filter(|s| s.has_scope(name)) {
                    targets.repositories.push(subtree.composite_id(name));
                } else {
                    match name.parse::<SourceCategory>() {
                        Ok(category) if self.category_sources(category) > 0 => match category {
                            SourceCategory::Archive => targets.push_data_sources(&self.archive),
                            SourceCategory::Biography => {
                                targets.push_data_sources(&self.biography)
                            }
                            SourceCategory::Docs => targets.push_data_sources(&self.docs),
                            SourceCategory::Repositories => {
                                targets.push_repositories(&self.repositories)
                            }
                            SourceCategory::All => self.push_everything(&mut targets),
                        },
                        _ => {
                            return Err(DomainError::InvalidScope {
                                scope: name.to_string(),
                                valid: self.valid_scopes(),
                            });
                        }
                    }
                }
            }
        }

        if include_docs {
            targets.push_data_sources(&self.docs);
        }

        if targets.is_empty() {
            return Err(DomainError::NoSourcesConfigured("search".to_string()));
        }
        Ok(targets)
    }

    fn push_everything(&self, targets: &mut SearchTargets) {
        targets.push_data_sources(self.source_id.iter());
        targets.push_data_sources(&self.archive);
        targets.push_data_sources(&self.biography);
        targets.push_repositories(&self.repositories);
        if let Some(subtree) = &self.subtree {
            targets.repositories.push(subtree.root());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::catalog::Subtree;

    fn epstein() -> SourceCatalog {
        SourceCatalog::new()
            .with_archive(["court-docs", "flight-logs"])
            .with_docs(["press"])
    }

    fn chromium() -> SourceCatalog {
        SourceCatalog::new().with_subtree(Subtree {
            org: "chromium".to_string(),
            dataset: "chromium".to_string(),
            branch: "main".to_string(),
            scopes: vec!["base".to_string(), "net".to_string(), "v8".to_string()],
        })
    }

    #[test]
    fn test_no_scope_searches_everything_but_docs() {
        let targets = epstein().resolve_scope(None, false).unwrap();
        assert_eq!(targets.data_sources, vec!["court-docs", "flight-logs"]);
        assert!(targets.repositories.is_empty());
    }

    #[test]
    fn test_include_docs_adds_docs() {
        let targets = epstein().resolve_scope(Some("archive"), true).unwrap();
        assert_eq!(targets.data_sources, vec!["court-docs", "flight-logs", "press"]);
    }

    #[test]
    fn test_docs_scope_is_not_duplicated() {
        let targets = epstein().resolve_scope(Some("docs"), true).unwrap();
        assert_eq!(targets.data_sources, vec!["press"]);
    }

    #[test]
    fn test_subtree_scope() {
        let targets = chromium().resolve_scope(Some("net"), false).unwrap();
        assert_eq!(targets.repositories, vec!["chromium/chromium/tree/main/net"]);
        assert!(targets.data_sources.is_empty());
    }

    #[test]
    fn test_unknown_scope_enumerates_valid_scopes() {
        let err = chromium().resolve_scope(Some("gpu"), false).unwrap_err();
        match err {
            DomainError::InvalidScope { scope, valid } => {
                assert_eq!(scope, "gpu");
                assert_eq!(valid, vec!["all", "base", "net", "v8"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unconfigured_category_is_invalid() {
        let err = epstein().resolve_scope(Some("biography"), false).unwrap_err();
        assert!(matches!(err, DomainError::InvalidScope { .. }));
    }

    #[test]
    fn test_empty_catalog_is_configuration_error() {
        let err = SourceCatalog::new().resolve_scope(None, true).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(" Archive ".parse::<SourceCategory>(), Ok(SourceCategory::Archive));
        assert!("nope".parse::<SourceCategory>().is_err());
    }

    #[test]
    fn test_docs_only_catalog_does_not_offer_all() {
        let catalog = SourceCatalog::new().with_docs(["press"]);
        assert_eq!(catalog.valid_scopes(), vec!["docs"]);

        let err = catalog.resolve_scope(Some("all"), false).unwrap_err();
        match err {
            DomainError::InvalidScope { valid, .. } => assert_eq!(valid, vec!["docs"]),
            other => panic!("unexpected error: {other}"),
        }

        let targets = catalog.resolve_scope(Some("docs"), false).unwrap();
        assert_eq!(targets.data_sources, vec!["press"]);
    }
}

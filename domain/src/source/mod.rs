//! Source domain module
//!
//! A deployment searches a fixed set of indexed corpora ("sources"). This
//! module models that set and the rules for turning the loose identifiers a
//! model passes to a tool into concrete upstream targets.
//!
//! | Identifier form | Resolves to |
//! |-----------------|-------------|
//! | configured data source id | [`SourceKind::DataSource`] |
//! | configured repository (`owner/repo`) | [`SourceKind::Repository`] |
//! | subtree scope name (`net`) | repository `<org>/<dataset>/tree/<branch>/net` |
//! | category (`archive`, `docs`, ...) | every source in that category (search only) |
//!
//! All resolution is pure and happens before a request is built, so a bad
//! identifier never costs a round-trip.

pub mod catalog;
pub mod scope;

pub use catalog::{SourceCatalog, SourceKind, SourceTarget, Subtree};
pub use scope::{SearchTargets, SourceCategory};

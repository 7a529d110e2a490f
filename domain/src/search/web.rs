//! Web search options

use super::Bounds;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const NUM_RESULTS: Bounds = Bounds::new(1, 10);
pub const DEFAULT_NUM_RESULTS: u32 = 5;
pub const DAYS_BACK: Bounds = Bounds::new(1, 3650);

/// Content categories the upstream web search can filter by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebCategory {
    #[serde(rename = "github")]
    Github,
    #[serde(rename = "company")]
    Company,
    #[serde(rename = "research paper")]
    ResearchPaper,
    #[serde(rename = "news")]
    News,
    #[serde(rename = "tweet")]
    Tweet,
    #[serde(rename = "pdf")]
    Pdf,
}

impl WebCategory {
    pub const ALL: [WebCategory; 6] = [
        WebCategory::Github,
        WebCategory::Company,
        WebCategory::ResearchPaper,
        WebCategory::News,
        WebCategory::Tweet,
        WebCategory::Pdf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WebCategory::Github => "github",
            WebCategory::Company => "company",
            WebCategory::ResearchPaper => "research paper",
            WebCategory::News => "news",
            WebCategory::Tweet => "tweet",
            WebCategory::Pdf => "pdf",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

impl FromStr for WebCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                DomainError::InvalidArgument(format!(
                    "category must be one of: {} (got '{}')",
                    Self::names().join(", "),
                    s
                ))
            })
    }
}

/// Options for one web search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSearchOptions {
    pub query: String,
    pub num_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<WebCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_back: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub find_similar_to: Option<String>,
}

impl WebSearchOptions {
    pub fn new(query: impl Into<String>) -> Result<Self, DomainError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(DomainError::InvalidArgument(
                "query must not be empty".to_string(),
            ));
        }
        Ok(Self {
            query,
            num_results: DEFAULT_NUM_RESULTS,
            category: None,
            days_back: None,
            find_similar_to: None,
        })
    }

    pub fn with_num_results(mut self, value: i64) -> Self {
        self.num_results = NUM_RESULTS.clamp(value);
        self
    }

    pub fn with_category(mut self, category: WebCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_days_back(mut self, value: i64) -> Self {
        self.days_back = Some(DAYS_BACK.clamp(value));
        self
    }

    pub fn with_find_similar_to(mut self, url: impl Into<String>) -> Self {
        self.find_similar_to = Some(url.into());
        self
    }
}

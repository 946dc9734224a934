//! Source reference value object

use serde::{Deserialize, Serialize};

/// Relevance assigned to every domain-filtered official result.
pub const OFFICIAL_RELEVANCE: f64 = 0.9;

/// Kind of authority a source represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceCategory {
    #[default]
    Government,
    Legal,
    Official,
    Academic,
}

impl SourceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Government => "government",
            Self::Legal => "legal",
            Self::Official => "official",
            Self::Academic => "academic",
        }
    }
}

impl std::fmt::Display for SourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One retrieved authoritative snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReference {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub relevance_score: f64,
    pub category: SourceCategory,
}

impl SourceReference {
    /// A government source at the fixed official relevance.
    pub fn official(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            relevance_score: OFFICIAL_RELEVANCE,
            category: SourceCategory::Government,
        }
    }

    /// Synthetic entry returned when the search capability is wholly
    /// unavailable, so citation logic always has something to work with.
    pub fn placeholder(query: &str) -> Self {
        Self::official(
            format!("Official guidelines for {}", query),
            "https://example-gov.com/guidelines",
            format!("Official guidance on {} from government sources.", query),
        )
    }
}

//! Search capability port
//!
//! Abstracts the external web search used to retrieve authoritative
//! sources. The retriever only ever issues domain-restricted queries.

use async_trait::async_trait;
use thiserror::Error;

/// A raw search hit, before it becomes a [`SourceReference`](concord_domain::SourceReference).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

impl SearchHit {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The search service could not be reached at all
    #[error("search unavailable: {0}")]
    Unavailable(String),

    #[error("search request failed: {0}")]
    RequestFailed(String),

    #[error("malformed search response: {0}")]
    MalformedResponse(String),
}

impl SearchError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, SearchError::Unavailable(_))
    }
}

/// Capability to run a text query and return up to `limit` hits.
#[async_trait]
pub trait SearchCapability: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, SearchError>;
}

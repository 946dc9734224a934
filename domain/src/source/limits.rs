//! Retrieval caps

use serde::{Deserialize, Serialize};

/// Bounds on how many sources one request retrieves and keeps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalLimits {
    /// Trusted domains queried per request (first N of the list)
    pub max_domains: usize,
    /// Results requested from each domain query
    pub results_per_domain: usize,
    /// Total sources kept after aggregation
    pub max_sources: usize,
}

impl Default for RetrievalLimits {
    fn default() -> Self {
        Self {
            max_domains: 3,
            results_per_domain: 2,
            max_sources: 5,
        }
    }
}

impl RetrievalLimits {
    /// Truncate aggregated sources to `max_sources`, keeping insertion order.
    pub fn cap<T>(&self, mut sources: Vec<T>) -> Vec<T> {
        sources.truncate(self.max_sources);
        sources
    }
}

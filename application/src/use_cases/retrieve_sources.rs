//! Retrieve sources use case
//!
//! Queries the trusted domains of a jurisdiction for authoritative
//! snippets. Retrieval never fails the request: search errors degrade to
//! fewer (or no) sources.

use crate::config::RetrievalConfig;
use crate::ports::search::{SearchCapability, SearchError, SearchHit};
use concord_domain::{Jurisdiction, PromptTemplate, SourceCategory, SourceReference};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct SourceRetriever {
    search: Option<Arc<dyn SearchCapability>>,
    config: RetrievalConfig,
}

impl SourceRetriever {
    pub fn new(search: Option<Arc<dyn SearchCapability>>, config: RetrievalConfig) -> Self {
        Self { search, config }
    }

    /// Number of domain queries a request for `jurisdiction` will issue.
    pub fn planned_queries(&self, jurisdiction: &Jurisdiction) -> usize {
        if !self.config.enabled || self.search.is_none() {
            return 0;
        }
        self.config.domains_to_query(jurisdiction).len()
    }

    /// Retrieve at most `max_sources` sources for `query`.
    ///
    /// Domains are queried concurrently; results keep domain order and
    /// then search-result order.
    pub async fn retrieve(&self, query: &str, jurisdiction: &Jurisdiction) -> Vec<SourceReference> {
        if !self.config.enabled {
            debug!("Source retrieval disabled");
            return Vec::new();
        }

        let Some(search) = &self.search else {
            debug!("No search capability configured");
            return self.placeholder(query);
        };

        let domains = self.config.domains_to_query(jurisdiction);
        if domains.is_empty() {
            return Vec::new();
        }

        let limit = self.config.limits.results_per_domain;
        let outcomes = join_all(domains.iter().map(|domain| {
            let search_query = PromptTemplate::site_query(domain, query);
            let search = Arc::clone(search);
            async move { (domain, search.search(&search_query, limit).await) }
        }))
        .await;

        let mut sources = Vec::new();
        let mut unavailable = 0usize;

        for (domain, outcome) in outcomes {
            match outcome {
                Ok(hits) => {
                    debug!(domain = %domain, hits = hits.len(), "Domain search completed");
                    sources.extend(hits.into_iter().take(limit).map(|hit| self.to_source(hit)));
                }
                Err(e) => {
                    warn!(domain = %domain, error = %e, "Domain search failed");
                    if matches!(e, SearchError::Unavailable(_)) {
                        unavailable += 1;
                    }
                }
            }
        }

        if unavailable == domains.len() {
            warn!("Search unavailable for every trusted domain");
            return self.placeholder(query);
        }

        let sources = self.config.limits.cap(sources);
        info!(count = sources.len(), jurisdiction = %jurisdiction, "Retrieved sources");
        sources
    }

    fn to_source(&self, hit: SearchHit) -> SourceReference {
        SourceReference {
            title: hit.title,
            url: hit.url,
            snippet: hit.snippet,
            relevance_score: self.config.relevance_score,
            category: SourceCategory::Government,
        }
    }

    fn placeholder(&self, query: &str) -> Vec<SourceReference> {
        if self.config.placeholder_on_unavailable {
            vec![SourceReference::placeholder(query)]
        } else {
            Vec::new()
        }
    }
}

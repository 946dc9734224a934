//! Orchestration parameters, use case control.
//!
//! These are resolved from the file configuration by the infrastructure
//! layer and handed to [`OrchestrateUseCase`](crate::use_cases::orchestrate::OrchestrateUseCase).

use concord_domain::{
    FallbackPolicy, Jurisdiction, OFFICIAL_RELEVANCE, QualityWeights, RetrievalLimits,
    TrustedDomains, VoteWeights,
};
use std::time::Duration;

/// Default end-to-end deadline for one request.
pub const DEFAULT_REQUEST_DEADLINE: Duration = Duration::from_secs(60);

/// Source retrieval parameters.
#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    /// When false, no search is issued and the source list is empty
    pub enabled: bool,
    pub limits: RetrievalLimits,
    /// Relevance assigned to every retrieved source
    pub relevance_score: f64,
    /// Return a synthetic source when search is wholly unavailable
    pub placeholder_on_unavailable: bool,
    pub domains: TrustedDomains,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limits: RetrievalLimits::default(),
            relevance_score: OFFICIAL_RELEVANCE,
            placeholder_on_unavailable: true,
            domains: TrustedDomains::builtin(),
        }
    }
}

impl RetrievalConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_limits(mut self, limits: RetrievalLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_placeholder(mut self, enabled: bool) -> Self {
        self.placeholder_on_unavailable = enabled;
        self
    }

    pub fn with_domains(mut self, domains: TrustedDomains) -> Self {
        self.domains = domains;
        self
    }

    /// Trusted domains actually queried for `jurisdiction` (first `max_domains`).
    pub fn domains_to_query(&self, jurisdiction: &Jurisdiction) -> &[String] {
        let domains = self.domains.domains_for(jurisdiction);
        &domains[..domains.len().min(self.limits.max_domains)]
    }
}

/// Full set of orchestration parameters.
#[derive(Debug, Clone)]
pub struct OrchestrationConfig {
    pub retrieval: RetrievalConfig,
    pub quality: QualityWeights,
    pub vote: VoteWeights,
    pub fallback: FallbackPolicy,
    /// End-to-end bound on dispatch. `None` waits for every adapter.
    pub request_deadline: Option<Duration>,
    /// Used when a request carries no valid jurisdiction tag
    pub default_jurisdiction: Jurisdiction,
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            retrieval: RetrievalConfig::default(),
            quality: QualityWeights::default(),
            vote: VoteWeights::default(),
            fallback: FallbackPolicy::default(),
            request_deadline: Some(DEFAULT_REQUEST_DEADLINE),
            default_jurisdiction: Jurisdiction::default(),
        }
    }
}

impl OrchestrationConfig {
    // ==================== Builder Methods ====================

    pub fn with_retrieval(mut self, retrieval: RetrievalConfig) -> Self {
        self.retrieval = retrieval;
        self
    }

    pub fn with_quality(mut self, quality: QualityWeights) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_vote(mut self, vote: VoteWeights) -> Self {
        self.vote = vote;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_request_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.request_deadline = deadline;
        self
    }

    pub fn with_default_jurisdiction(mut self, jurisdiction: Jurisdiction) -> Self {
        self.default_jurisdiction = jurisdiction;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OrchestrationConfig::default();
        assert!(config.retrieval.enabled);
        assert_eq!(config.request_deadline, Some(Duration::from_secs(60)));
        assert_eq!(config.fallback.confidence, 0.3);
        assert_eq!(config.default_jurisdiction.code(), "US");
    }

    #[test]
    fn test_domains_to_query_respects_cap() {
        let sg = Jurisdiction::new("SG").unwrap();
        let retrieval = RetrievalConfig::default().with_domains(
            TrustedDomains::builtin().with_domains(
                &sg,
                vec!["a.gov.sg".into(), "b.gov.sg".into(), "c.gov.sg".into(), "d.gov.sg".into()],
            ),
        );
        assert_eq!(
            retrieval.domains_to_query(&sg),
            &["a.gov.sg".to_string(), "b.gov.sg".to_string(), "c.gov.sg".to_string()]
        );
    }

    #[test]
    fn test_domains_to_query_short_list() {
        let retrieval = RetrievalConfig::default().with_limits(RetrievalLimits {
            max_domains: 10,
            ..RetrievalLimits::default()
        });
        let us = Jurisdiction::default();
        assert_eq!(
            retrieval.domains_to_query(&us).len(),
            TrustedDomains::builtin().domains_for(&us).len()
        );
    }
}

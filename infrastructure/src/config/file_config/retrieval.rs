//! Retrieval configuration from TOML (`[retrieval]` section)

use concord_application::RetrievalConfig;
use concord_domain::{
    ConfigIssue, ConfigIssueCode, Jurisdiction, OFFICIAL_RELEVANCE, RetrievalLimits,
    TrustedDomains,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    pub enabled: bool,
    pub max_domains: usize,
    pub results_per_domain: usize,
    pub max_sources: usize,
    pub relevance_score: f64,
    pub placeholder_on_unavailable: bool,
    /// DuckDuckGo Instant Answer endpoint
    pub search_base_url: String,
    pub timeout_secs: u64,
    /// Jurisdiction code → trusted domains, merged over the built-in table
    pub domains: BTreeMap<String, Vec<String>>,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        let limits = RetrievalLimits::default();
        Self {
            enabled: true,
            max_domains: limits.max_domains,
            results_per_domain: limits.results_per_domain,
            max_sources: limits.max_sources,
            relevance_score: OFFICIAL_RELEVANCE,
            placeholder_on_unavailable: true,
            search_base_url: "https://api.duckduckgo.com".to_string(),
            timeout_secs: 10,
            domains: BTreeMap::new(),
        }
    }
}

impl FileRetrievalConfig {
    pub fn limits(&self) -> RetrievalLimits {
        RetrievalLimits {
            max_domains: self.max_domains,
            results_per_domain: self.results_per_domain,
            max_sources: self.max_sources,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Built-in table with the configured overrides applied.
    ///
    /// Keys that are not valid jurisdiction tags are skipped and reported.
    pub fn trusted_domains(&self, default: &Jurisdiction) -> (TrustedDomains, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut table = TrustedDomains::builtin().with_default(default);

        for (code, domains) in &self.domains {
            match Jurisdiction::new(code) {
                Ok(jurisdiction) => table = table.with_domains(&jurisdiction, domains.clone()),
                Err(e) => issues.push(ConfigIssue::warning(
                    ConfigIssueCode::InvalidJurisdiction {
                        value: code.clone(),
                    },
                    format!("retrieval.domains: skipping '{}': {}", code, e),
                )),
            }
        }

        (table, issues)
    }

    pub fn to_retrieval_config(&self, default: &Jurisdiction) -> (RetrievalConfig, Vec<ConfigIssue>) {
        let (domains, issues) = self.trusted_domains(default);
        let config = RetrievalConfig {
            enabled: self.enabled,
            limits: self.limits(),
            relevance_score: self.relevance_score.clamp(0.0, 1.0),
            placeholder_on_unavailable: self.placeholder_on_unavailable,
            domains,
        };
        (config, issues)
    }
}

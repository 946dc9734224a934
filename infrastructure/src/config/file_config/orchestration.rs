//! Orchestration configuration from TOML (`[orchestration]` section)

use concord_domain::{
    ConfigIssue, ConfigIssueCode, DEFAULT_JURISDICTION, FallbackPolicy, Jurisdiction,
    MAX_FALLBACK_CONFIDENCE,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestrationConfig {
    /// End-to-end dispatch deadline in seconds; 0 disables it
    pub request_deadline_secs: u64,
    pub fallback_confidence: f64,
    /// Jurisdiction used when a request has none, and for unmapped lookups
    pub default_jurisdiction: String,
}

impl Default for FileOrchestrationConfig {
    fn default() -> Self {
        Self {
            request_deadline_secs: 60,
            fallback_confidence: FallbackPolicy::default().confidence,
            default_jurisdiction: DEFAULT_JURISDICTION.to_string(),
        }
    }
}

impl FileOrchestrationConfig {
    pub fn request_deadline(&self) -> Option<Duration> {
        (self.request_deadline_secs > 0).then(|| Duration::from_secs(self.request_deadline_secs))
    }

    pub fn fallback(&self) -> FallbackPolicy {
        FallbackPolicy {
            confidence: self.fallback_confidence.clamp(0.0, MAX_FALLBACK_CONFIDENCE),
        }
    }

    /// Warning when `fallback_confidence` exceeds [`MAX_FALLBACK_CONFIDENCE`].
    pub fn validate_fallback(&self) -> Option<ConfigIssue> {
        (self.fallback_confidence > MAX_FALLBACK_CONFIDENCE).then(|| {
            ConfigIssue::warning(
                ConfigIssueCode::FallbackConfidenceCapped,
                format!(
                    "orchestration.fallback_confidence {} exceeds {}, capping it",
                    self.fallback_confidence, MAX_FALLBACK_CONFIDENCE
                ),
            )
        })
    }

    /// Parsed default jurisdiction; an invalid tag falls back to `US`.
    pub fn parse_default_jurisdiction(&self) -> (Jurisdiction, Option<ConfigIssue>) {
        match Jurisdiction::new(&self.default_jurisdiction) {
            Ok(j) => (j, None),
            Err(e) => (
                Jurisdiction::default(),
                Some(ConfigIssue::warning(
                    ConfigIssueCode::InvalidJurisdiction {
                        value: self.default_jurisdiction.clone(),
                    },
                    format!(
                        "orchestration.default_jurisdiction: {}, using {}",
                        e, DEFAULT_JURISDICTION
                    ),
                )),
            ),
        }
    }
}

//! Fallback policy
//!
//! Produces a degraded but well-formed candidate when no provider
//! returned a usable answer.

use crate::candidate::CandidateResponse;
use crate::core::jurisdiction::Jurisdiction;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Provider id reported for fallback answers.
pub const FALLBACK_PROVIDER: &str = "fallback";

/// Highest confidence a fallback answer may report.
pub const MAX_FALLBACK_CONFIDENCE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackPolicy {
    /// Reported confidence (and pinned quality score) of the fallback answer
    pub confidence: f64,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            confidence: MAX_FALLBACK_CONFIDENCE,
        }
    }
}

impl FallbackPolicy {
    /// Build the advisory candidate for `query` in `jurisdiction`.
    ///
    /// The candidate carries no failure and zero usage. Its quality score
    /// is pinned to the configured confidence, capped at
    /// [`MAX_FALLBACK_CONFIDENCE`].
    pub fn candidate(&self, query: &str, jurisdiction: &Jurisdiction) -> CandidateResponse {
        let confidence = self.confidence.clamp(0.0, MAX_FALLBACK_CONFIDENCE);
        let content = format!(
            "Guidance for {}: {}. Please ensure compliance with local regulations and \
             consult official sources for the most current requirements.",
            jurisdiction,
            query.trim_end_matches(['.', '?', '!'])
        );
        let mut candidate =
            CandidateResponse::success(FALLBACK_PROVIDER, content, confidence, Duration::ZERO)
                .with_token_count(0);
        candidate.record_quality_score(confidence);
        candidate
    }
}

//! Caller-facing orchestration result

use super::fallback::FALLBACK_PROVIDER;
use crate::core::jurisdiction::Jurisdiction;
use crate::source::SourceReference;
use crate::util::duration_ms;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The single answer returned for one orchestrated request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationResult {
    /// Winning content followed by the numbered source legend
    pub final_text: String,
    /// Provider id of the winning candidate, or `"fallback"`
    pub provider_used: String,
    /// Quality score of the winning candidate
    pub confidence_score: f64,
    /// Latency of the winning candidate's call
    #[serde(with = "duration_ms")]
    pub latency: Duration,
    /// Sources cited in the legend, in retrieval order
    pub sources: Vec<SourceReference>,
    /// Usable candidates considered (0 when the fallback answered)
    pub candidate_count: usize,
    /// Token usage summed over every usable candidate, not just the winner
    pub total_tokens: u64,
    pub jurisdiction: Jurisdiction,
    pub generated_at: DateTime<Utc>,
}

impl OrchestrationResult {
    /// Returns `true` when no provider produced a usable answer.
    pub fn is_fallback(&self) -> bool {
        self.provider_used == FALLBACK_PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let result = OrchestrationResult {
            final_text: "text".to_string(),
            provider_used: "fallback".to_string(),
            confidence_score: 0.3,
            latency: Duration::from_millis(12),
            sources: vec![],
            candidate_count: 0,
            total_tokens: 0,
            jurisdiction: Jurisdiction::default(),
            generated_at: Utc::now(),
        };
        assert!(result.is_fallback());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["latency"], 12);
        assert_eq!(json["jurisdiction"], "US");
    }
}

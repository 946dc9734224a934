//! Candidate response entity

use super::failure::CandidateFailure;
use crate::util::{duration_ms, estimate_tokens, word_count};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One backend's answer to one request.
///
/// Created by a provider adapter, annotated once with a quality score,
/// and discarded when the request completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResponse {
    /// Opaque identifier of the backend/model variant (e.g. `"openai/gpt-4"`)
    pub provider_id: String,
    /// Generated text (may be empty)
    pub content: String,
    /// Baseline confidence reported by the adapter, in [0, 1]
    pub reported_confidence: f64,
    /// Wall-clock duration of the call
    #[serde(with = "duration_ms")]
    pub latency: Duration,
    /// Exact or estimated token usage
    pub token_count: u64,
    /// Present when the call did not produce a usable answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<CandidateFailure>,
    /// Set exactly once by the quality scorer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
}

impl CandidateResponse {
    /// Creates a successful candidate.
    ///
    /// `token_count` defaults to the word-count estimate; use
    /// [`with_token_count`](Self::with_token_count) when the backend
    /// reports exact usage.
    pub fn success(
        provider_id: impl Into<String>,
        content: impl Into<String>,
        reported_confidence: f64,
        latency: Duration,
    ) -> Self {
        let content = content.into();
        let token_count = estimate_tokens(&content);
        Self {
            provider_id: provider_id.into(),
            content,
            reported_confidence: reported_confidence.clamp(0.0, 1.0),
            latency,
            token_count,
            failure: None,
            quality_score: None,
        }
    }

    /// Creates a failed candidate. Content is empty and usage is zero.
    pub fn failure(
        provider_id: impl Into<String>,
        failure: CandidateFailure,
        latency: Duration,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            content: String::new(),
            reported_confidence: 0.0,
            latency,
            token_count: 0,
            failure: Some(failure),
            quality_score: None,
        }
    }

    /// Replaces the estimated token count with backend-reported usage.
    pub fn with_token_count(mut self, token_count: u64) -> Self {
        self.token_count = token_count;
        self
    }

    /// Returns `true` if the candidate carries no failure.
    pub fn is_usable(&self) -> bool {
        self.failure.is_none()
    }

    /// Word count of the generated content.
    pub fn word_count(&self) -> usize {
        word_count(&self.content)
    }

    /// Record the quality score. Later calls are ignored so the first
    /// score sticks; returns whether this call set it.
    pub fn record_quality_score(&mut self, score: f64) -> bool {
        if self.quality_score.is_some() {
            return false;
        }
        self.quality_score = Some(score.clamp(0.0, 1.0));
        true
    }

    /// Quality score, or 0.0 when not yet scored.
    pub fn quality(&self) -> f64 {
        self.quality_score.unwrap_or(0.0)
    }
}

/// Drops every candidate with a failure, keeping order.
pub fn retain_usable(candidates: Vec<CandidateResponse>) -> Vec<CandidateResponse> {
    candidates.into_iter().filter(|c| c.is_usable()).collect()
}

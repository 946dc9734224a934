//! Quality scorer
//!
//! Computes a normalized quality score per candidate from intrinsic
//! signal only: reported confidence, content length, latency and how many
//! sources were available to the prompt.

use crate::candidate::CandidateResponse;
use crate::source::SourceReference;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Weights and thresholds of the quality formula.
///
/// The defaults add up to a maximum of 1.0:
/// `0.4 × confidence + 0.2 (length) + 0.1 (latency) + 0.3 (sources)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityWeights {
    pub confidence: f64,
    /// Bonus when the word count is within `[ideal_min_words, ideal_max_words]`
    pub ideal_length_bonus: f64,
    /// Bonus when the word count exceeds `min_words` but is outside the ideal range
    pub acceptable_length_bonus: f64,
    pub min_words: usize,
    pub ideal_min_words: usize,
    pub ideal_max_words: usize,
    /// Bonus when latency is within `[normal_latency_min, normal_latency_max]`
    pub normal_latency_bonus: f64,
    /// Partial credit for suspiciously fast answers
    pub fast_latency_bonus: f64,
    #[serde(with = "secs_f64")]
    pub normal_latency_min: Duration,
    #[serde(with = "secs_f64")]
    pub normal_latency_max: Duration,
    pub per_source_bonus: f64,
    pub max_source_bonus: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            confidence: 0.4,
            ideal_length_bonus: 0.2,
            acceptable_length_bonus: 0.1,
            min_words: 20,
            ideal_min_words: 50,
            ideal_max_words: 500,
            normal_latency_bonus: 0.1,
            fast_latency_bonus: 0.05,
            normal_latency_min: Duration::from_secs(1),
            normal_latency_max: Duration::from_secs(10),
            per_source_bonus: 0.05,
            max_source_bonus: 0.3,
        }
    }
}

impl QualityWeights {
    /// Highest score the weights can produce before clamping.
    pub fn max_total(&self) -> f64 {
        self.confidence
            + self.ideal_length_bonus.max(self.acceptable_length_bonus)
            + self.normal_latency_bonus.max(self.fast_latency_bonus)
            + self.max_source_bonus
    }

    fn length_term(&self, words: usize) -> f64 {
        if (self.ideal_min_words..=self.ideal_max_words).contains(&words) {
            self.ideal_length_bonus
        } else if words > self.min_words {
            self.acceptable_length_bonus
        } else {
            0.0
        }
    }

    fn latency_term(&self, latency: Duration) -> f64 {
        if latency < self.normal_latency_min {
            self.fast_latency_bonus
        } else if latency <= self.normal_latency_max {
            self.normal_latency_bonus
        } else {
            0.0
        }
    }

    fn source_term(&self, source_count: usize) -> f64 {
        (self.per_source_bonus * source_count as f64).min(self.max_source_bonus)
    }

    /// Score one candidate against the sources that were available to it.
    ///
    /// Pure: the same inputs always yield the same value in `[0, 1]`.
    pub fn score(&self, candidate: &CandidateResponse, sources: &[SourceReference]) -> f64 {
        let total = self.confidence * candidate.reported_confidence
            + self.length_term(candidate.word_count())
            + self.latency_term(candidate.latency)
            + self.source_term(sources.len());
        total.clamp(0.0, 1.0)
    }
}

/// Serde helper for durations written as fractional seconds in config files.
pub(crate) mod secs_f64 {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

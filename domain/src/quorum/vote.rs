//! Weighted multi-factor vote among scored candidates.

use crate::candidate::CandidateResponse;
use crate::scoring::quality::secs_f64;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Weights of the selection vote.
///
/// `vote = 0.4 × quality + 0.3 × confidence
///        + 0.2 × max(0, 1 − latency / 30s)
///        + 0.1 × (1.0 if words in [100, 400] else 0.5)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoteWeights {
    pub quality: f64,
    pub confidence: f64,
    pub latency: f64,
    pub length: f64,
    /// Latency at which the latency term reaches zero
    #[serde(with = "secs_f64")]
    pub latency_ceiling: Duration,
    pub ideal_min_words: usize,
    pub ideal_max_words: usize,
    /// Length factor applied outside the ideal word range
    pub off_length_factor: f64,
}

impl Default for VoteWeights {
    fn default() -> Self {
        Self {
            quality: 0.4,
            confidence: 0.3,
            latency: 0.2,
            length: 0.1,
            latency_ceiling: Duration::from_secs(30),
            ideal_min_words: 100,
            ideal_max_words: 400,
            off_length_factor: 0.5,
        }
    }
}

impl VoteWeights {
    pub fn total(&self) -> f64 {
        self.quality + self.confidence + self.latency + self.length
    }

    /// Vote score for one candidate.
    pub fn vote_score(&self, candidate: &CandidateResponse) -> f64 {
        let ceiling = self.latency_ceiling.as_secs_f64();
        let latency_factor = if ceiling > 0.0 {
            (1.0 - candidate.latency.as_secs_f64() / ceiling).max(0.0)
        } else {
            0.0
        };
        let words = candidate.word_count();
        let length_factor = if (self.ideal_min_words..=self.ideal_max_words).contains(&words) {
            1.0
        } else {
            self.off_length_factor
        };

        self.quality * candidate.quality()
            + self.confidence * candidate.reported_confidence
            + self.latency * latency_factor
            + self.length * length_factor
    }

    /// Score every candidate, in input order.
    pub fn ballots(&self, candidates: &[CandidateResponse]) -> Vec<Ballot> {
        candidates
            .iter()
            .enumerate()
            .map(|(index, c)| Ballot {
                index,
                provider_id: c.provider_id.clone(),
                score: self.vote_score(c),
            })
            .collect()
    }

    /// Index of the winning candidate, or `None` when `candidates` is empty.
    ///
    /// A single candidate wins without voting. Otherwise the highest vote
    /// score wins and ties go to the earliest candidate.
    pub fn select(&self, candidates: &[CandidateResponse]) -> Option<usize> {
        match candidates.len() {
            0 => None,
            1 => Some(0),
            _ => self
                .ballots(candidates)
                .into_iter()
                .fold(None::<Ballot>, |best, ballot| match best {
                    Some(b) if b.score >= ballot.score => Some(b),
                    _ => Some(ballot),
                })
                .map(|b| b.index),
        }
    }
}

/// One candidate's vote score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ballot {
    /// Position of the candidate in registration order
    pub index: usize,
    pub provider_id: String,
    pub score: f64,
}

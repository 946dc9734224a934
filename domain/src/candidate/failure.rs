//! Typed failure descriptor carried by a [`CandidateResponse`](super::CandidateResponse).

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Why a provider did not produce a usable candidate.
///
/// Failures never propagate as errors: adapters and the dispatcher attach
/// them to the candidate, and failed candidates are filtered out before
/// scoring.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum CandidateFailure {
    #[error("provider not configured: {0}")]
    Unconfigured(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("adapter panicked: {0}")]
    Panicked(String),

    #[error("request deadline exceeded")]
    DeadlineExceeded,

    #[error("cancelled")]
    Cancelled,
}

impl CandidateFailure {
    /// Short machine-friendly label, used in log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unconfigured(_) => "unconfigured",
            Self::Request(_) => "request",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Timeout(_) => "timeout",
            Self::Panicked(_) => "panicked",
            Self::DeadlineExceeded => "deadline_exceeded",
            Self::Cancelled => "cancelled",
        }
    }
}

//! Provider adapter port
//!
//! Defines the uniform capability every text-generation backend exposes.

use async_trait::async_trait;
use concord_domain::{CandidateFailure, CandidateResponse};
use std::future::Future;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur inside a provider adapter.
///
/// These never leave the adapter: [`complete_within`] turns them into a
/// failure-tagged [`CandidateResponse`].
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl From<GatewayError> for CandidateFailure {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::NotConfigured(m) => CandidateFailure::Unconfigured(m),
            GatewayError::ConnectionError(m) | GatewayError::RequestFailed(m) => {
                CandidateFailure::Request(m)
            }
            GatewayError::InvalidResponse(m) => CandidateFailure::InvalidResponse(m),
            GatewayError::Timeout(d) => CandidateFailure::Timeout(d),
        }
    }
}

/// Raw output of one backend call, before it becomes a candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub content: String,
    /// Exact usage when the backend reports it
    pub token_count: Option<u64>,
}

impl Completion {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            token_count: None,
        }
    }

    pub fn with_token_count(mut self, token_count: u64) -> Self {
        self.token_count = Some(token_count);
        self
    }
}

/// A single text-generation backend (one model variant of one family).
///
/// Implementations live in the infrastructure layer. `generate` never
/// fails: unconfigured backends, call errors and timeouts come back as a
/// candidate with `failure` set.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Opaque identifier, e.g. `"anthropic/claude-3-haiku-20240307"`
    fn provider_id(&self) -> &str;

    /// Generate one candidate answer.
    async fn generate(&self, prompt: &str, system_context: &str) -> CandidateResponse;
}

/// Run one backend call with a timeout and turn its outcome into a
/// candidate.
///
/// Latency is measured from the start of the call to completion or
/// failure. `reported_confidence` is the adapter's fixed baseline.
pub async fn complete_within<F>(
    provider_id: &str,
    reported_confidence: f64,
    timeout: Duration,
    call: F,
) -> CandidateResponse
where
    F: Future<Output = Result<Completion, GatewayError>>,
{
    let started = Instant::now();
    let outcome = match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(GatewayError::Timeout(timeout)),
    };
    let latency = started.elapsed();

    match outcome {
        Ok(completion) => {
            debug!(provider = provider_id, latency_ms = latency.as_millis() as u64, "Provider call succeeded");
            let candidate =
                CandidateResponse::success(provider_id, completion.content, reported_confidence, latency);
            match completion.token_count {
                Some(tokens) => candidate.with_token_count(tokens),
                None => candidate,
            }
        }
        Err(error) => {
            debug!(provider = provider_id, error = %error, "Provider call failed");
            CandidateResponse::failure(provider_id, error.into(), latency)
        }
    }
}

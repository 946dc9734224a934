//! Dispatch use case
//!
//! Fans one prompt out to every registered provider adapter and collects
//! one candidate per adapter.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::provider::ProviderAdapter;
use concord_domain::{CandidateFailure, CandidateResponse, retain_usable};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Why collection stopped before every adapter reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    Deadline,
    Cancelled,
}

/// Concurrent provider fan-out with per-task fault isolation.
///
/// Each adapter runs in its own task. A panic inside an adapter becomes a
/// `Panicked` failure for that adapter only. When the request deadline
/// passes or the cancellation token fires, tasks that already finished are
/// kept and the rest are aborted and recorded as `DeadlineExceeded` /
/// `Cancelled`, with the time elapsed since dispatch as their latency.
pub struct Dispatcher {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    deadline: Option<Duration>,
    cancellation_token: Option<CancellationToken>,
}

impl Dispatcher {
    pub fn new(adapters: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        Self {
            adapters,
            deadline: None,
            cancellation_token: None,
        }
    }

    /// Bound the whole fan-out. Adapters finished by then are kept.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn adapter_count(&self) -> usize {
        self.adapters.len()
    }

    /// Usable candidates only, in adapter registration order.
    pub async fn dispatch(&self, prompt: &str, system_context: &str) -> Vec<CandidateResponse> {
        retain_usable(self.dispatch_all(prompt, system_context, &NoProgress).await)
    }

    /// One candidate per adapter, failures included, in registration order.
    pub async fn dispatch_all(
        &self,
        prompt: &str,
        system_context: &str,
        progress: &dyn ProgressNotifier,
    ) -> Vec<CandidateResponse> {
        if self.adapters.is_empty() {
            return Vec::new();
        }

        info!("Dispatching to {} providers", self.adapters.len());

        let prompt: Arc<str> = Arc::from(prompt);
        let system_context: Arc<str> = Arc::from(system_context);
        let dispatch_started = Instant::now();
        let mut join_set = JoinSet::new();

        for (index, adapter) in self.adapters.iter().enumerate() {
            let adapter = Arc::clone(adapter);
            let prompt = Arc::clone(&prompt);
            let system_context = Arc::clone(&system_context);

            join_set.spawn(async move {
                let started = Instant::now();
                let outcome = AssertUnwindSafe(adapter.generate(&prompt, &system_context))
                    .catch_unwind()
                    .await;
                let candidate = outcome.unwrap_or_else(|payload| {
                    CandidateResponse::failure(
                        adapter.provider_id(),
                        CandidateFailure::Panicked(panic_message(payload.as_ref())),
                        started.elapsed(),
                    )
                });
                (index, candidate)
            });
        }

        let mut slots: Vec<Option<CandidateResponse>> = vec![None; self.adapters.len()];
        let deadline_at = self.deadline.map(|d| dispatch_started + d);

        let interrupt = loop {
            let joined = tokio::select! {
                biased;
                _ = cancelled(&self.cancellation_token) => break Some(Interrupt::Cancelled),
                _ = deadline_reached(deadline_at) => break Some(Interrupt::Deadline),
                joined = join_set.join_next() => joined,
            };

            match joined {
                Some(joined) => collect(joined, &mut slots, progress),
                None => break None,
            }
        };

        if let Some(interrupt) = interrupt {
            // Tasks that finished before the interrupt still count
            while let Some(joined) = join_set.try_join_next() {
                collect(joined, &mut slots, progress);
            }
            join_set.abort_all();
            let pending = slots.iter().filter(|s| s.is_none()).count();
            warn!(?interrupt, pending, "Dispatch interrupted");
        }

        let elapsed = dispatch_started.elapsed();
        slots
            .into_iter()
            .zip(&self.adapters)
            .map(|(slot, adapter)| {
                slot.unwrap_or_else(|| {
                    let failure = match interrupt {
                        Some(Interrupt::Cancelled) => CandidateFailure::Cancelled,
                        Some(Interrupt::Deadline) => CandidateFailure::DeadlineExceeded,
                        None => CandidateFailure::Panicked("task did not complete".to_string()),
                    };
                    let candidate = CandidateResponse::failure(adapter.provider_id(), failure, elapsed);
                    progress.on_provider_complete(&candidate.provider_id, candidate.failure.as_ref());
                    candidate
                })
            })
            .collect()
    }
}

/// Store one finished task in its registration slot.
fn collect(
    joined: Result<(usize, CandidateResponse), JoinError>,
    slots: &mut [Option<CandidateResponse>],
    progress: &dyn ProgressNotifier,
) {
    match joined {
        Ok((index, candidate)) => {
            match &candidate.failure {
                None => debug!(provider = %candidate.provider_id, "Provider responded"),
                Some(f) => warn!(
                    provider = %candidate.provider_id,
                    kind = f.label(),
                    "Provider failed: {}", f
                ),
            }
            progress.on_provider_complete(&candidate.provider_id, candidate.failure.as_ref());
            slots[index] = Some(candidate);
        }
        // catch_unwind covers panics; this is an abort from outside
        Err(e) => warn!("Task join error: {}", e),
    }
}

async fn cancelled(token: &Option<CancellationToken>) {
    match token {
        Some(token) => token.cancelled().await,
        None => std::future::pending().await,
    }
}

async fn deadline_reached(deadline_at: Option<Instant>) {
    match deadline_at {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

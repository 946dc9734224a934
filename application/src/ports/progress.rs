//! Progress notification port
//!
//! Defines the interface for reporting progress while a request moves
//! through retrieval, dispatch and selection.

use concord_domain::{CandidateFailure, Stage};

/// Callback for progress updates during orchestration
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain log lines, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts. `total` is the number of units of work
    /// in the stage (domains queried, providers dispatched, candidates
    /// scored).
    fn on_stage_start(&self, stage: Stage, total: usize);

    /// Called when one provider's candidate arrives during dispatch
    fn on_provider_complete(&self, provider_id: &str, failure: Option<&CandidateFailure>);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: Stage);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: Stage, _total: usize) {}
    fn on_provider_complete(&self, _provider_id: &str, _failure: Option<&CandidateFailure>) {}
    fn on_stage_complete(&self, _stage: Stage) {}
}

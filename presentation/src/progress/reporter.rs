//! Progress reporting for orchestration

use colored::Colorize;
use concord_application::ProgressNotifier;
use concord_domain::{CandidateFailure, Stage};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

const STAGE_COUNT: usize = 3;

/// Reports progress during orchestration with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn stage_display_name(stage: Stage) -> String {
        let label = match stage {
            Stage::Retrieval => "Retrieving sources",
            Stage::Dispatch => "Querying providers",
            Stage::Selection => "Selecting answer",
        };
        format!("Stage {}/{}: {}", stage.number(), STAGE_COUNT, label)
    }

    fn provider_status(provider_id: &str, failure: Option<&CandidateFailure>) -> String {
        match failure {
            None => format!("{} {}", "v".green(), provider_id),
            Some(f) => format!("{} {} ({})", "x".red(), provider_id, f.label()),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: Stage, total: usize) {
        let pb = self.multi.add(ProgressBar::new(total as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(Self::stage_display_name(stage));
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.stage_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_provider_complete(&self, provider_id: &str, failure: Option<&CandidateFailure>) {
        if let Ok(slot) = self.stage_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.set_message(Self::provider_status(provider_id, failure));
            pb.inc(1);
        }
    }

    fn on_stage_complete(&self, stage: Stage) {
        if let Ok(mut slot) = self.stage_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.set_position(pb.length().unwrap_or(0));
            pb.finish_with_message(format!("{} complete!", stage.as_str().green()));
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: Stage, total: usize) {
        eprintln!(
            "{} {} ({})",
            "->".cyan(),
            ProgressReporter::stage_display_name(stage).bold(),
            total
        );
    }

    fn on_provider_complete(&self, provider_id: &str, failure: Option<&CandidateFailure>) {
        eprintln!("  {}", ProgressReporter::provider_status(provider_id, failure));
    }

    fn on_stage_complete(&self, _stage: Stage) {
        eprintln!();
    }
}

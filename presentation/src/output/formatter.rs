//! Output formatter trait

use concord_domain::{OrchestrationResult, OutputFormat};

/// Trait for formatting orchestration results
pub trait OutputFormatter {
    /// Format the answer with provider and timing details
    fn format(&self, question: &str, result: &OrchestrationResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &OrchestrationResult) -> String;

    /// Format the cited answer only (concise output)
    fn format_answer_only(&self, result: &OrchestrationResult) -> String;

    /// Dispatch on the selected output format
    fn render(&self, format: OutputFormat, question: &str, result: &OrchestrationResult) -> String {
        match format {
            OutputFormat::Full => self.format(question, result),
            OutputFormat::Answer => self.format_answer_only(result),
            OutputFormat::Json => self.format_json(result),
        }
    }
}

//! Console output formatter for orchestration results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use concord_domain::{ConfigIssue, OrchestrationResult, Severity, TrustedDomains};

/// Formats orchestration results for console display
pub struct ConsoleFormatter;

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, question: &str, result: &OrchestrationResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Concord Answer"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Question:".cyan().bold(), question));
        output.push_str(&format!(
            "{} {}\n\n",
            "Jurisdiction:".cyan().bold(),
            result.jurisdiction
        ));

        let provider = if result.is_fallback() {
            format!("{} (no provider answered)", result.provider_used).yellow()
        } else {
            result.provider_used.green()
        };
        output.push_str(&format!("{} {}\n", "Provider:".cyan().bold(), provider));
        output.push_str(&format!(
            "{} {:.2}\n",
            "Confidence:".cyan().bold(),
            result.confidence_score
        ));
        output.push_str(&format!(
            "{} {} ms\n",
            "Latency:".cyan().bold(),
            result.latency.as_millis()
        ));
        output.push_str(&format!(
            "{} {} candidates, {} tokens\n",
            "Considered:".cyan().bold(),
            result.candidate_count,
            result.total_tokens
        ));

        output.push_str(&Self::section_header("Answer"));
        output.push_str(&format!("\n{}\n", result.final_text));

        output.push_str(&format!(
            "\n{}\n",
            format!("Generated at {}", result.generated_at.to_rfc3339()).dimmed()
        ));
        output.push_str(&Self::footer());

        output
    }

    fn format_json(&self, result: &OrchestrationResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_answer_only(&self, result: &OrchestrationResult) -> String {
        let mut output = result.final_text.clone();
        if result.is_fallback() {
            output.push_str(&format!(
                "\n\n{}",
                "(No provider answered; this is generic guidance.)".dimmed()
            ));
        }
        output
    }
}

impl ConsoleFormatter {
    /// Jurisdiction table for `--list-jurisdictions`
    pub fn format_jurisdictions(domains: &TrustedDomains) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Jurisdictions:".cyan().bold()));
        for (code, list) in domains.iter() {
            let marker = if code == domains.default_code() {
                " (default)".dimmed().to_string()
            } else {
                String::new()
            };
            output.push_str(&format!(
                "  {:<4}{} {}\n",
                code.bold(),
                marker,
                list.join(", ")
            ));
        }
        output
    }

    /// One line per configuration issue
    pub fn format_config_issues(issues: &[ConfigIssue]) -> String {
        issues
            .iter()
            .map(|issue| match issue.severity {
                Severity::Error => format!("{} {}", "error:".red().bold(), issue.message),
                Severity::Warning => format!("{} {}", "warning:".yellow().bold(), issue.message),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use concord_domain::{ConfigIssueCode, Jurisdiction, OutputFormat, SourceReference};
    use std::time::Duration;

    fn result(provider: &str) -> OrchestrationResult {
        OrchestrationResult {
            final_text: "Yes, 14 days [1].\n\n**Sources:**\n[1] Leave - https://mom.gov.sg/leave\n"
                .to_string(),
            provider_used: provider.to_string(),
            confidence_score: 0.82,
            latency: Duration::from_millis(1450),
            sources: vec![SourceReference::official("Leave", "https://mom.gov.sg/leave", "s")],
            candidate_count: 3,
            total_tokens: 420,
            jurisdiction: Jurisdiction::new("SG").unwrap(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_full_format_contains_details() {
        colored::control::set_override(false);
        let output = ConsoleFormatter.render(
            OutputFormat::Full,
            "Annual leave?",
            &result("anthropic/claude-3-haiku-20240307"),
        );
        assert!(output.contains("Question: Annual leave?"));
        assert!(output.contains("Jurisdiction: SG"));
        assert!(output.contains("Provider: anthropic/claude-3-haiku-20240307"));
        assert!(output.contains("Confidence: 0.82"));
        assert!(output.contains("Latency: 1450 ms"));
        assert!(output.contains("3 candidates, 420 tokens"));
        assert!(output.contains("**Sources:**"));
    }

    #[test]
    fn test_answer_only() {
        colored::control::set_override(false);
        let output = ConsoleFormatter.render(OutputFormat::Answer, "q", &result("openai/gpt-4"));
        assert!(output.starts_with("Yes, 14 days [1]."));
        assert!(!output.contains("generic guidance"));

        let fallback = ConsoleFormatter.render(OutputFormat::Answer, "q", &result("fallback"));
        assert!(fallback.contains("generic guidance"));
    }

    #[test]
    fn test_json_format() {
        let output = ConsoleFormatter.render(OutputFormat::Json, "q", &result("openai/gpt-4"));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["provider_used"], "openai/gpt-4");
        assert_eq!(value["latency"], 1450);
        assert_eq!(value["jurisdiction"], "SG");
    }

    #[test]
    fn test_jurisdiction_listing() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_jurisdictions(&TrustedDomains::builtin());
        assert!(output.contains("SG   mom.gov.sg, cpf.gov.sg, iras.gov.sg"));
        assert!(output.contains("US   (default) dol.gov"));
    }

    #[test]
    fn test_config_issue_lines() {
        colored::control::set_override(false);
        let issues = vec![
            ConfigIssue::warning(ConfigIssueCode::NoProvidersConfigured, "no keys"),
            ConfigIssue::error(
                ConfigIssueCode::EmptyModelName {
                    provider: "openai".to_string(),
                },
                "empty model",
            ),
        ];
        assert_eq!(
            ConsoleFormatter::format_config_issues(&issues),
            "warning: no keys\nerror: empty model"
        );
    }
}

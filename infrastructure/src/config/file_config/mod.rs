//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod orchestration;
mod output;
mod providers;
mod retrieval;
mod scoring;

pub use orchestration::FileOrchestrationConfig;
pub use output::FileOutputConfig;
pub use providers::{FileAnthropicConfig, FileGeminiConfig, FileOpenAiConfig, FileProvidersConfig};
pub use retrieval::FileRetrievalConfig;
pub use scoring::FileScoringConfig;

use concord_application::OrchestrationConfig;
use concord_domain::{ConfigIssue, ConfigIssueCode, Jurisdiction, TrustedDomains};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend families and their model lists
    pub providers: FileProvidersConfig,
    /// Trusted-domain search settings
    pub retrieval: FileRetrievalConfig,
    /// Quality and vote weights
    pub scoring: FileScoringConfig,
    /// Deadline, fallback and default jurisdiction
    pub orchestration: FileOrchestrationConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Nothing here stops a request from running; errors mark settings
    /// the CLI refuses to start with.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Empty model names
        for (family, models) in self.providers.model_lists() {
            if models.iter().any(|m| m.trim().is_empty()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName {
                        provider: family.to_string(),
                    },
                    format!("providers.{}.models: model name must not be empty", family),
                ));
            }
        }

        // 2. Credentials
        if self.providers.configured_families().is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoProvidersConfigured,
                "No provider API key found; every answer will be the fallback",
            ));
        }

        // 3. Weights
        issues.extend(self.scoring.validate());

        // 4. Jurisdictions
        let (default, issue) = self.orchestration.parse_default_jurisdiction();
        issues.extend(issue);
        let (domains, domain_issues) = self.retrieval.trusted_domains(&default);
        issues.extend(domain_issues);
        if !domains.is_mapped(&default) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnmappedDefaultJurisdiction {
                    code: default.code().to_string(),
                },
                format!(
                    "orchestration.default_jurisdiction '{}' has no trusted domains",
                    default
                ),
            ));
        }

        // 5. Fallback
        issues.extend(self.orchestration.validate_fallback());

        // 6. Retrieval caps
        if self.retrieval.enabled && self.retrieval.max_sources == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::SourcesDisabled,
                "retrieval.max_sources is 0; answers will never cite sources",
            ));
        }

        issues
    }

    pub fn default_jurisdiction(&self) -> Jurisdiction {
        self.orchestration.parse_default_jurisdiction().0
    }

    /// Trusted-domain table in effect (built-in plus overrides).
    pub fn trusted_domains(&self) -> TrustedDomains {
        self.retrieval.trusted_domains(&self.default_jurisdiction()).0
    }

    /// Resolve the use case parameters. Issues are reported by [`validate`](Self::validate).
    pub fn to_orchestration_config(&self) -> OrchestrationConfig {
        let (retrieval, _) = self
            .retrieval
            .to_retrieval_config(&self.default_jurisdiction());
        OrchestrationConfig::default()
            .with_retrieval(retrieval)
            .with_quality(self.scoring.quality)
            .with_vote(self.scoring.vote)
            .with_fallback(self.orchestration.fallback())
            .with_request_deadline(self.orchestration.request_deadline())
            .with_default_jurisdiction(self.default_jurisdiction())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_domain::OutputFormat;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[providers.openai]
models = ["gpt-4o"]
api_key = "sk-test"

[providers.gemini]
models = []

[retrieval]
max_domains = 2

[retrieval.domains]
NZ = ["employment.govt.nz"]

[scoring.vote]
latency_ceiling = 20.0

[orchestration]
request_deadline_secs = 45
default_jurisdiction = "sg"

[output]
format = "full"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.openai.models, vec!["gpt-4o"]);
        assert!(config.providers.gemini.models.is_empty());
        assert_eq!(config.output.format, Some(OutputFormat::Full));

        let orchestration = config.to_orchestration_config();
        assert_eq!(orchestration.request_deadline, Some(Duration::from_secs(45)));
        assert_eq!(orchestration.retrieval.limits.max_domains, 2);
        assert_eq!(orchestration.vote.latency_ceiling, Duration::from_secs(20));
        assert_eq!(orchestration.retrieval.domains.default_code(), "SG");
        assert_eq!(orchestration.default_jurisdiction.code(), "SG");
        assert_eq!(config.default_jurisdiction().code(), "SG");
    }

    #[test]
    fn test_validate_empty_model_name() {
        let mut config = FileConfig::default();
        config.providers.anthropic.models.push(" ".to_string());

        let issues = config.validate();
        assert!(issues.iter().any(|i| i.is_error()
            && i.code
                == ConfigIssueCode::EmptyModelName {
                    provider: "anthropic".to_string()
                }));
    }

    #[test]
    fn test_validate_unmapped_default_and_zero_sources() {
        let mut config = FileConfig::default();
        config.orchestration.default_jurisdiction = "NZ".to_string();
        config.retrieval.max_sources = 0;

        let issues = config.validate();
        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::UnmappedDefaultJurisdiction { code } if code == "NZ"
        )));
        assert!(
            issues
                .iter()
                .any(|i| i.code == ConfigIssueCode::SourcesDisabled)
        );
    }

    #[test]
    fn test_validate_fallback_confidence_above_ceiling() {
        let mut config = FileConfig::default();
        config.orchestration.fallback_confidence = 0.5;

        let issues = config.validate();
        assert!(issues.iter().any(|i| i.code == ConfigIssueCode::FallbackConfidenceCapped
            && !i.is_error()));
        assert_eq!(config.to_orchestration_config().fallback.confidence, 0.3);
    }

    #[test]
    fn test_validate_no_credentials() {
        let mut config = FileConfig::default();
        config.providers.openai.api_key_env = "CONCORD_TEST_UNSET_OPENAI".to_string();
        config.providers.gemini.api_key_env = "CONCORD_TEST_UNSET_GEMINI".to_string();
        config.providers.anthropic.api_key_env = "CONCORD_TEST_UNSET_ANTHROPIC".to_string();

        let issues = config.validate();
        assert!(
            issues
                .iter()
                .any(|i| i.code == ConfigIssueCode::NoProvidersConfigured && !i.is_error())
        );
    }
}

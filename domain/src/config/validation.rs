//! Configuration issues
//!
//! Config validation reports problems instead of failing: the engine runs
//! with any configuration, but some combinations degrade every request.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A weight block does not add up to 1.0.
    WeightsNotNormalized { section: String },
    /// No provider has resolvable credentials; every request falls back.
    NoProvidersConfigured,
    /// A model list contains an empty name.
    EmptyModelName { provider: String },
    /// The default jurisdiction has no trusted-domain entry.
    UnmappedDefaultJurisdiction { code: String },
    /// A jurisdiction tag in the config could not be parsed.
    InvalidJurisdiction { value: String },
    /// `max_sources` is zero, so no source is ever cited.
    SourcesDisabled,
    /// `fallback_confidence` is above the fallback ceiling and gets capped.
    FallbackConfidenceCapped,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

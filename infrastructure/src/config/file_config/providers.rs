//! Provider configuration from TOML (`[providers]` section)
//!
//! One section per backend family. Every entry in `models` becomes one
//! provider adapter with id `<family>/<model>`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Resolve an API key: inline `api_key` first, then the named environment
/// variable. Empty values count as missing.
pub(crate) fn resolve_api_key(api_key: Option<&str>, api_key_env: &str) -> Option<String> {
    api_key
        .map(str::to_string)
        .or_else(|| std::env::var(api_key_env).ok())
        .filter(|k| !k.trim().is_empty())
}

/// OpenAI API provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the OpenAI API (can be overridden for compatible gateways).
    pub base_url: String,
    pub models: Vec<String>,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Baseline confidence reported for every answer
    pub confidence: f64,
    /// Per-call timeout
    pub timeout_secs: u64,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            models: vec!["gpt-4".to_string(), "gpt-3.5-turbo".to_string()],
            max_tokens: 800,
            temperature: 0.3,
            confidence: 0.85,
            timeout_secs: 30,
        }
    }
}

impl FileOpenAiConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), &self.api_key_env)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Anthropic API provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnthropicConfig {
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the Anthropic API.
    pub base_url: String,
    pub models: Vec<String>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub confidence: f64,
    pub timeout_secs: u64,
    /// Anthropic API version header.
    pub api_version: String,
}

impl Default for FileAnthropicConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            models: vec![
                "claude-3-sonnet-20240229".to_string(),
                "claude-3-haiku-20240307".to_string(),
            ],
            max_tokens: 800,
            temperature: 0.3,
            confidence: 0.88,
            timeout_secs: 30,
            api_version: "2023-06-01".to_string(),
        }
    }
}

impl FileAnthropicConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), &self.api_key_env)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Google Gemini API provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable name for the API key (default: "GOOGLE_API_KEY").
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub models: Vec<String>,
    pub max_tokens: u32,
    pub temperature: f64,
    pub confidence: f64,
    pub timeout_secs: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GOOGLE_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            models: vec!["gemini-pro".to_string(), "gemini-1.5-flash".to_string()],
            max_tokens: 800,
            temperature: 0.3,
            confidence: 0.80,
            timeout_secs: 30,
        }
    }
}

impl FileGeminiConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), &self.api_key_env)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// All backend families. Field order is registration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub openai: FileOpenAiConfig,
    pub gemini: FileGeminiConfig,
    pub anthropic: FileAnthropicConfig,
}

impl FileProvidersConfig {
    /// `(family, models)` pairs in registration order.
    pub fn model_lists(&self) -> [(&'static str, &[String]); 3] {
        [
            ("openai", self.openai.models.as_slice()),
            ("gemini", self.gemini.models.as_slice()),
            ("anthropic", self.anthropic.models.as_slice()),
        ]
    }

    /// Families whose credentials resolve, in registration order.
    pub fn configured_families(&self) -> Vec<&'static str> {
        let mut families = Vec::new();
        if self.openai.resolve_api_key().is_some() {
            families.push("openai");
        }
        if self.gemini.resolve_api_key().is_some() {
            families.push("gemini");
        }
        if self.anthropic.resolve_api_key().is_some() {
            families.push("anthropic");
        }
        families
    }
}

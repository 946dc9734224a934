//! Provider adapters for the three backend families
//!
//! Every configured model becomes one [`ProviderAdapter`] with id
//! `<family>/<model>`. Registration order is OpenAI, Gemini, Anthropic,
//! each in the order its models are listed; that order is also the vote
//! tie-break order.

pub mod anthropic;
pub mod gemini;
mod http;
pub mod openai;

pub use anthropic::AnthropicAdapter;
pub use gemini::GeminiAdapter;
pub use http::build_client;
pub use openai::OpenAiAdapter;

use crate::config::FileProvidersConfig;
use concord_application::ProviderAdapter;
use concord_domain::{CandidateFailure, CandidateResponse};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Per-adapter call settings, resolved from the family's config section.
#[derive(Debug, Clone)]
pub struct AdapterSettings {
    pub model: String,
    /// `None` makes every call an `Unconfigured` failure
    pub api_key: Option<String>,
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Baseline confidence reported for every answer
    pub confidence: f64,
    pub timeout: Duration,
}

impl AdapterSettings {
    pub fn provider_id(&self, family: &str) -> String {
        format!("{}/{}", family, self.model)
    }

    pub(crate) fn unconfigured(&self, provider_id: &str) -> CandidateResponse {
        CandidateResponse::failure(
            provider_id,
            CandidateFailure::Unconfigured(format!("no API key for {}", provider_id)),
            Duration::ZERO,
        )
    }

    #[cfg(test)]
    pub(crate) fn for_test(model: &str, base_url: &str, api_key: Option<&str>, confidence: f64) -> Self {
        Self {
            model: model.to_string(),
            api_key: api_key.map(str::to_string),
            base_url: base_url.to_string(),
            max_tokens: 800,
            temperature: 0.3,
            confidence,
            timeout: Duration::from_secs(5),
        }
    }
}

/// Builds the adapter list from configuration.
pub struct ProviderRegistry;

impl ProviderRegistry {
    /// Adapters for every family whose credentials resolve.
    ///
    /// Families without a key are skipped entirely rather than registered
    /// as permanently failing adapters.
    pub fn from_config(config: &FileProvidersConfig, client: &Client) -> Vec<Arc<dyn ProviderAdapter>> {
        let mut adapters: Vec<Arc<dyn ProviderAdapter>> = Vec::new();

        let openai = &config.openai;
        match openai.resolve_api_key() {
            Some(key) => {
                for model in &openai.models {
                    let settings = AdapterSettings {
                        model: model.clone(),
                        api_key: Some(key.clone()),
                        base_url: trim_base(&openai.base_url),
                        max_tokens: openai.max_tokens,
                        temperature: openai.temperature,
                        confidence: openai.confidence,
                        timeout: openai.timeout(),
                    };
                    adapters.push(Arc::new(OpenAiAdapter::new(settings, client.clone())));
                }
            }
            None => debug!(env = %openai.api_key_env, "Skipping openai: no API key"),
        }

        let gemini = &config.gemini;
        match gemini.resolve_api_key() {
            Some(key) => {
                for model in &gemini.models {
                    let settings = AdapterSettings {
                        model: model.clone(),
                        api_key: Some(key.clone()),
                        base_url: trim_base(&gemini.base_url),
                        max_tokens: gemini.max_tokens,
                        temperature: gemini.temperature,
                        confidence: gemini.confidence,
                        timeout: gemini.timeout(),
                    };
                    adapters.push(Arc::new(GeminiAdapter::new(settings, client.clone())));
                }
            }
            None => debug!(env = %gemini.api_key_env, "Skipping gemini: no API key"),
        }

        let anthropic = &config.anthropic;
        match anthropic.resolve_api_key() {
            Some(key) => {
                for model in &anthropic.models {
                    let settings = AdapterSettings {
                        model: model.clone(),
                        api_key: Some(key.clone()),
                        base_url: trim_base(&anthropic.base_url),
                        max_tokens: anthropic.max_tokens,
                        temperature: anthropic.temperature,
                        confidence: anthropic.confidence,
                        timeout: anthropic.timeout(),
                    };
                    adapters.push(Arc::new(AnthropicAdapter::new(
                        settings,
                        anthropic.api_version.clone(),
                        client.clone(),
                    )));
                }
            }
            None => debug!(env = %anthropic.api_key_env, "Skipping anthropic: no API key"),
        }

        info!("Registered {} provider adapters", adapters.len());
        adapters
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

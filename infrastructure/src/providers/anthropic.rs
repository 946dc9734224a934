//! Anthropic Messages API adapter.

use super::AdapterSettings;
use super::http::send_json;
use async_trait::async_trait;
use concord_application::{Completion, GatewayError, ProviderAdapter, complete_within};
use concord_domain::CandidateResponse;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const FAMILY: &str = "anthropic";

/// One Claude model variant.
///
/// POST `{base_url}/v1/messages` with `x-api-key` and `anthropic-version`
/// headers. The system context travels in the top-level `system` field.
pub struct AnthropicAdapter {
    id: String,
    settings: AdapterSettings,
    api_version: String,
    client: Client,
}

impl AnthropicAdapter {
    pub fn new(settings: AdapterSettings, api_version: impl Into<String>, client: Client) -> Self {
        Self {
            id: settings.provider_id(FAMILY),
            settings,
            api_version: api_version.into(),
            client,
        }
    }

    async fn complete(
        &self,
        api_key: &str,
        prompt: &str,
        system_context: &str,
    ) -> Result<Completion, GatewayError> {
        let url = format!("{}/v1/messages", self.settings.base_url);
        let request = MessagesRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            system: system_context,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response: MessagesResponse = send_json(
            self.client
                .post(&url)
                .header("x-api-key", api_key)
                .header("anthropic-version", &self.api_version)
                .json(&request),
        )
        .await?;

        let text: String = response
            .content
            .into_iter()
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        let completion = Completion::new(text);
        Ok(match response.usage {
            Some(usage) => completion.with_token_count(usage.input_tokens + usage.output_tokens),
            None => completion,
        })
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

/// Only `text` blocks carry a `text` field
#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn provider_id(&self) -> &str {
        &self.id
    }

    async fn generate(&self, prompt: &str, system_context: &str) -> CandidateResponse {
        let Some(api_key) = self.settings.api_key.as_deref() else {
            return self.settings.unconfigured(&self.id);
        };
        complete_within(
            &self.id,
            self.settings.confidence,
            self.settings.timeout,
            self.complete(api_key, prompt, system_context),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_domain::CandidateFailure;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(server: &MockServer) -> AnthropicAdapter {
        AnthropicAdapter::new(
            AdapterSettings::for_test("claude-3-haiku-20240307", &server.uri(), Some("sk-ant"), 0.88),
            "2023-06-01",
            Client::new(),
        )
    }

    #[tokio::test]
    async fn test_generate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-ant"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(json!({
                "model": "claude-3-haiku-20240307",
                "system": "ctx",
                "messages": [{"role": "user", "content": "Is overtime mandatory?"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_1",
                "type": "message",
                "role": "assistant",
                "content": [
                    {"type": "text", "text": "No, "},
                    {"type": "text", "text": "not in general [1]."}
                ],
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 40, "output_tokens": 12}
            })))
            .mount(&server)
            .await;

        let candidate = adapter(&server).generate("Is overtime mandatory?", "ctx").await;

        assert_eq!(candidate.provider_id, "anthropic/claude-3-haiku-20240307");
        assert_eq!(candidate.content, "No, not in general [1].");
        assert_eq!(candidate.token_count, 52);
        assert_eq!(candidate.reported_confidence, 0.88);
    }

    #[tokio::test]
    async fn test_empty_content_is_not_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [],
                "usage": {"input_tokens": 3, "output_tokens": 0}
            })))
            .mount(&server)
            .await;

        let candidate = adapter(&server).generate("q", "ctx").await;
        assert!(candidate.is_usable());
        assert!(candidate.content.is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .mount(&server)
            .await;

        let candidate = adapter(&server).generate("q", "ctx").await;
        match candidate.failure {
            Some(CandidateFailure::Request(msg)) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("invalid x-api-key"));
            }
            other => panic!("unexpected failure: {:?}", other),
        }
    }
}

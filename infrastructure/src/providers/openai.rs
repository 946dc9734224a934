//! OpenAI Chat Completions adapter.

use super::AdapterSettings;
use super::http::send_json;
use async_trait::async_trait;
use concord_application::{Completion, GatewayError, ProviderAdapter, complete_within};
use concord_domain::CandidateResponse;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const FAMILY: &str = "openai";

/// One OpenAI model variant.
///
/// POST `{base_url}/v1/chat/completions` with bearer authentication.
pub struct OpenAiAdapter {
    id: String,
    settings: AdapterSettings,
    client: Client,
}

impl OpenAiAdapter {
    pub fn new(settings: AdapterSettings, client: Client) -> Self {
        Self {
            id: settings.provider_id(FAMILY),
            settings,
            client,
        }
    }

    async fn complete(
        &self,
        api_key: &str,
        prompt: &str,
        system_context: &str,
    ) -> Result<Completion, GatewayError> {
        let url = format!("{}/v1/chat/completions", self.settings.base_url);
        let request = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_context,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let response: ChatResponse =
            send_json(self.client.post(&url).bearer_auth(api_key).json(&request)).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::InvalidResponse("response has no choices".to_string()))?;

        let completion = Completion::new(choice.message.content.unwrap_or_default());
        Ok(match response.usage {
            Some(usage) => completion.with_token_count(usage.total_tokens),
            None => completion,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: u64,
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
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
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(server: &MockServer, api_key: Option<&str>) -> OpenAiAdapter {
        OpenAiAdapter::new(
            AdapterSettings::for_test("gpt-4", &server.uri(), api_key, 0.85),
            Client::new(),
        )
    }

    #[tokio::test]
    async fn test_generate_success_with_usage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4",
                "messages": [
                    {"role": "system", "content": "ctx"},
                    {"role": "user", "content": "What is the minimum wage?"}
                ],
                "max_tokens": 800
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "It depends [1]."}}],
                "usage": {"prompt_tokens": 20, "completion_tokens": 5, "total_tokens": 25}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let candidate = adapter(&server, Some("sk-test"))
            .generate("What is the minimum wage?", "ctx")
            .await;

        assert_eq!(candidate.provider_id, "openai/gpt-4");
        assert_eq!(candidate.content, "It depends [1].");
        assert_eq!(candidate.token_count, 25);
        assert_eq!(candidate.reported_confidence, 0.85);
        assert!(candidate.is_usable());
    }

    #[tokio::test]
    async fn test_http_error_becomes_request_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let candidate = adapter(&server, Some("sk-test")).generate("q", "ctx").await;

        match candidate.failure {
            Some(CandidateFailure::Request(msg)) => assert!(msg.contains("429")),
            other => panic!("unexpected failure: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_becomes_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let candidate = adapter(&server, Some("sk-test")).generate("q", "ctx").await;
        assert!(matches!(
            candidate.failure,
            Some(CandidateFailure::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_key_is_unconfigured_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let candidate = adapter(&server, None).generate("q", "ctx").await;
        assert!(matches!(
            candidate.failure,
            Some(CandidateFailure::Unconfigured(_))
        ));
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"choices": []}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let mut settings = AdapterSettings::for_test("gpt-4", &server.uri(), Some("sk"), 0.85);
        settings.timeout = Duration::from_millis(100);
        let candidate = OpenAiAdapter::new(settings, Client::new())
            .generate("q", "ctx")
            .await;

        assert_eq!(
            candidate.failure,
            Some(CandidateFailure::Timeout(Duration::from_millis(100)))
        );
    }
}

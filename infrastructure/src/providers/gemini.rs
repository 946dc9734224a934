//! Google Gemini `generateContent` adapter.

use super::AdapterSettings;
use super::http::send_json;
use async_trait::async_trait;
use concord_application::{Completion, GatewayError, ProviderAdapter, complete_within};
use concord_domain::CandidateResponse;
use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const FAMILY: &str = "gemini";

/// One Gemini model variant.
///
/// Gemini gets a single user turn: the system context and the question
/// are folded into one text part.
pub struct GeminiAdapter {
    id: String,
    settings: AdapterSettings,
    client: Client,
}

impl GeminiAdapter {
    pub fn new(settings: AdapterSettings, client: Client) -> Self {
        Self {
            id: settings.provider_id(FAMILY),
            settings,
            client,
        }
    }

    fn combined_prompt(system_context: &str, prompt: &str) -> String {
        format!("{}\n\nUser Query: {}", system_context, prompt)
    }

    async fn complete(
        &self,
        api_key: &str,
        prompt: &str,
        system_context: &str,
    ) -> Result<Completion, GatewayError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url, self.settings.model
        );
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: Self::combined_prompt(system_context, prompt),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.settings.max_tokens,
                temperature: self.settings.temperature,
            },
        };

        let response: GenerateResponse = send_json(
            self.client
                .post(&url)
                .query(&[("key", api_key)])
                .json(&request),
        )
        .await?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::InvalidResponse("response has no candidates".to_string()))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        // Without usage metadata the candidate keeps the word-count estimate
        let completion = Completion::new(text);
        Ok(match response.usage_metadata.and_then(|u| u.total_token_count) {
            Some(total) => completion.with_token_count(total),
            None => completion,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    total_token_count: Option<u64>,
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
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
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(server: &MockServer) -> GeminiAdapter {
        GeminiAdapter::new(
            AdapterSettings::for_test("gemini-pro", &server.uri(), Some("g-key"), 0.80),
            Client::new(),
        )
    }

    #[tokio::test]
    async fn test_generate_with_usage_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-pro:generateContent"))
            .and(query_param("key", "g-key"))
            .and(body_partial_json(json!({
                "contents": [{"role": "user", "parts": [{"text": "ctx\n\nUser Query: CPF rates?"}]}],
                "generationConfig": {"maxOutputTokens": 800}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "Rates vary by age [1]."}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 30, "candidatesTokenCount": 6, "totalTokenCount": 36}
            })))
            .mount(&server)
            .await;

        let candidate = adapter(&server).generate("CPF rates?", "ctx").await;

        assert_eq!(candidate.provider_id, "gemini/gemini-pro");
        assert_eq!(candidate.content, "Rates vary by age [1].");
        assert_eq!(candidate.token_count, 36);
    }

    #[tokio::test]
    async fn test_missing_usage_uses_estimate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "one two three four five six seven eight nine ten"}]}}]
            })))
            .mount(&server)
            .await;

        let candidate = adapter(&server).generate("q", "ctx").await;
        assert_eq!(candidate.token_count, 13);
    }

    #[tokio::test]
    async fn test_no_candidates_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let candidate = adapter(&server).generate("q", "ctx").await;
        assert!(matches!(
            candidate.failure,
            Some(CandidateFailure::InvalidResponse(_))
        ));
    }
}

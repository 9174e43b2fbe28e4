//! Google Gemini API provider.

use crate::ai::provider::{AiError, CompletionRequest, CompletionStream, LlmProvider};
use async_trait::async_trait;
use serde_json::Value;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug)]
pub struct GeminiProvider {
    pub api_key: String,
    pub model: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            // Accepts both bare and "models/"-prefixed ids
            model: model.trim_start_matches("models/").to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn parse_stream_data(json: &Value) -> Option<String> {
        json.pointer("/candidates/0/content/parts/0/text")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn stream_completion(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionStream, AiError> {
        let url = format!(
            "{}/models/{}:streamGenerateContent?key={}&alt=sse",
            GEMINI_BASE_URL, self.model, self.api_key
        );

        let body = serde_json::json!({
            "systemInstruction": {"parts": [{"text": request.system}]},
            "contents": [{"role": "user", "parts": [{"text": request.prompt}]}],
            "generationConfig": {"temperature": request.temperature}
        });

        let resp = self.client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::ProviderUnavailable(format!("gemini: {}", e)))?;
        let resp = super::ensure_success(resp, "gemini").await?;

        Ok(super::delta_stream(resp, Self::parse_stream_data))
    }

    fn name(&self) -> &str { "gemini" }
}

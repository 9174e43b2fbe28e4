//! Anthropic Claude API provider.

use crate::ai::provider::{AiError, CompletionRequest, CompletionStream, LlmProvider};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug)]
pub struct ClaudeProvider {
    pub api_key: String,
    pub model: String,
    client: reqwest::Client,
}

impl ClaudeProvider {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn parse_stream_data(json: &Value) -> Option<String> {
        if json.get("type").and_then(|v| v.as_str()) != Some("content_block_delta") {
            return None;
        }
        json.pointer("/delta/text")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

#[async_trait]
impl LlmProvider for ClaudeProvider {
    async fn stream_completion(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionStream, AiError> {
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": 4096,
            "system": request.system,
            "messages": [{"role": "user", "content": request.prompt}],
            "temperature": request.temperature,
            "stream": true
        });

        let resp = self.client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::ProviderUnavailable(format!("claude: {}", e)))?;
        let resp = super::ensure_success(resp, "claude").await?;

        Ok(super::delta_stream(resp, Self::parse_stream_data))
    }

    fn name(&self) -> &str { "claude" }
}

//! OpenAI-compatible provider (OpenAI and Groq, configurable base URL).

use crate::ai::provider::{AiError, CompletionRequest, CompletionStream, LlmProvider};
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug)]
pub struct OpenAiProvider {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, model: &str, base_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn parse_stream_data(json: &Value) -> Option<String> {
        json.pointer("/choices/0/delta/content")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn stream_completion(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionStream, AiError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system},
                {"role": "user", "content": request.prompt}
            ],
            "temperature": request.temperature,
            "stream": true
        });

        let resp = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::ProviderUnavailable(format!("openai: {}", e)))?;
        let resp = super::ensure_success(resp, "openai").await?;

        Ok(super::delta_stream(resp, Self::parse_stream_data))
    }

    fn name(&self) -> &str { "openai" }
}

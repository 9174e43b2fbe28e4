//! Core LLM provider trait and error type.

use std::pin::Pin;
use async_trait::async_trait;
use futures::Stream;

/// Errors from the provider gateway and provider calls.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("Provider is missing. Please select a provider in Settings.")]
    MissingProvider,
    #[error("Please add your {0} API Key in settings.")]
    MissingApiKey(String),
    #[error("Provider '{0}' unavailable")]
    ProviderUnavailable(String),
    #[error("HTTP error: {0}")]
    Http(String),
}

/// One request to a streaming completion endpoint.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
}

/// Ordered text fragments as the model emits them.
pub type CompletionStream = Pin<Box<dyn Stream<Item = Result<String, AiError>> + Send>>;

/// A provider that streams text completions given system + user prompts.
#[async_trait]
pub trait LlmProvider: Send + Sync + std::fmt::Debug {
    /// Start a streaming completion. The first fragment is available as soon
    /// as the model emits it.
    async fn stream_completion(&self, request: CompletionRequest)
        -> Result<CompletionStream, AiError>;
    /// Human-readable provider name (e.g. "openai", "claude").
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[derive(Debug)]
    struct MockLlm {
        chunks: Vec<String>,
    }

    #[async_trait::async_trait]
    impl LlmProvider for MockLlm {
        async fn stream_completion(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionStream, AiError> {
            let chunks: Vec<Result<String, AiError>> =
                self.chunks.iter().cloned().map(Ok).collect();
            Ok(Box::pin(futures::stream::iter(chunks)))
        }

        fn name(&self) -> &str { "mock" }
    }

    #[tokio::test]
    async fn test_llm_provider_trait_streams_in_order() {
        let llm = MockLlm {
            chunks: vec!["[{\"id\":".to_string(), "1}]".to_string()],
        };
        let request = CompletionRequest {
            system: "system".to_string(),
            prompt: "user".to_string(),
            temperature: 0.5,
        };
        let mut stream = llm.stream_completion(request).await.unwrap();
        let mut out = String::new();
        while let Some(chunk) = stream.next().await {
            out.push_str(&chunk.unwrap());
        }
        assert_eq!(out, "[{\"id\":1}]");
        assert_eq!(llm.name(), "mock");
    }

    #[test]
    fn test_ai_error_display() {
        let e = AiError::MissingApiKey("Anthropic".to_string());
        assert_eq!(e.to_string(), "Please add your Anthropic API Key in settings.");
        let e = AiError::MissingProvider;
        assert!(e.to_string().contains("Provider is missing"));
    }
}

//! AI layer — provider gateway and streaming LLM adapters.

pub mod provider;
pub mod providers;

pub use provider::{AiError, CompletionRequest, CompletionStream, LlmProvider};

use std::sync::Arc;
use serde::{Serialize, Deserialize};

use providers::claude::ClaudeProvider;
use providers::gemini::GeminiProvider;
use providers::openai::OpenAiProvider;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// The closed set of supported providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenAi,
    Anthropic,
    Google,
    Groq,
}

impl ProviderId {
    pub const ALL: [ProviderId; 4] = [
        ProviderId::OpenAi,
        ProviderId::Anthropic,
        ProviderId::Google,
        ProviderId::Groq,
    ];

    /// Map a header value to a provider. Unknown ids fall back to the
    /// OpenAI-compatible adapter rather than failing; callers validate the
    /// id against the known set before this point.
    pub fn from_header(value: &str) -> Self {
        match value {
            "anthropic" => ProviderId::Anthropic,
            "google" => ProviderId::Google,
            "groq" => ProviderId::Groq,
            _ => ProviderId::OpenAi,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::Anthropic => "anthropic",
            ProviderId::Google => "google",
            ProviderId::Groq => "groq",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OpenAI",
            ProviderId::Anthropic => "Anthropic",
            ProviderId::Google => "Google",
            ProviderId::Groq => "Groq",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "gpt-4o-mini",
            ProviderId::Anthropic => "claude-3-haiku-20240307",
            ProviderId::Google => "models/gemini-1.5-flash-latest",
            ProviderId::Groq => "llama3-70b-8192",
        }
    }

    /// Conventional environment variable holding this provider's key.
    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OPENAI_API_KEY",
            ProviderId::Anthropic => "ANTHROPIC_API_KEY",
            ProviderId::Google => "GEMINI_API_KEY",
            ProviderId::Groq => "GROQ_API_KEY",
        }
    }
}

/// Map a provider id + credential to a configured streaming client with its
/// default model. Fails before any network activity when the provider or
/// credential is absent; each adapter differs only in wire endpoint and
/// default model identifier.
pub fn resolve_client(
    provider: Option<&str>,
    api_key: Option<&str>,
) -> Result<Arc<dyn LlmProvider>, AiError> {
    let provider = provider
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(AiError::MissingProvider)?;
    let id = ProviderId::from_header(provider);

    let api_key = api_key
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AiError::MissingApiKey(id.display_name().to_string()))?;

    let client: Arc<dyn LlmProvider> = match id {
        ProviderId::OpenAi => {
            Arc::new(OpenAiProvider::new(api_key, id.default_model(), OPENAI_BASE_URL))
        }
        ProviderId::Groq => {
            Arc::new(OpenAiProvider::new(api_key, id.default_model(), GROQ_BASE_URL))
        }
        ProviderId::Anthropic => Arc::new(ClaudeProvider::new(api_key, id.default_model())),
        ProviderId::Google => Arc::new(GeminiProvider::new(api_key, id.default_model())),
    };
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id_from_header() {
        assert_eq!(ProviderId::from_header("anthropic"), ProviderId::Anthropic);
        assert_eq!(ProviderId::from_header("google"), ProviderId::Google);
        assert_eq!(ProviderId::from_header("groq"), ProviderId::Groq);
        assert_eq!(ProviderId::from_header("openai"), ProviderId::OpenAi);
    }

    #[test]
    fn test_provider_id_unknown_falls_back_to_openai() {
        assert_eq!(ProviderId::from_header("mistral"), ProviderId::OpenAi);
        assert_eq!(ProviderId::from_header(""), ProviderId::OpenAi);
    }

    #[test]
    fn test_provider_table() {
        assert_eq!(ProviderId::OpenAi.default_model(), "gpt-4o-mini");
        assert_eq!(ProviderId::Anthropic.default_model(), "claude-3-haiku-20240307");
        assert_eq!(ProviderId::Google.default_model(), "models/gemini-1.5-flash-latest");
        assert_eq!(ProviderId::Groq.default_model(), "llama3-70b-8192");
        assert_eq!(ProviderId::Groq.display_name(), "Groq");
    }

    #[test]
    fn test_resolve_client_missing_provider() {
        let err = resolve_client(None, Some("sk-test")).unwrap_err();
        assert!(matches!(err, AiError::MissingProvider));
        let err = resolve_client(Some("  "), Some("sk-test")).unwrap_err();
        assert!(matches!(err, AiError::MissingProvider));
    }

    #[test]
    fn test_resolve_client_missing_key_names_provider() {
        let err = resolve_client(Some("anthropic"), None).unwrap_err();
        assert_eq!(err.to_string(), "Please add your Anthropic API Key in settings.");
        let err = resolve_client(Some("groq"), Some("")).unwrap_err();
        assert_eq!(err.to_string(), "Please add your Groq API Key in settings.");
    }

    #[test]
    fn test_resolve_client_dispatch() {
        for id in ProviderId::ALL {
            let client = resolve_client(Some(id.as_str()), Some("sk-test")).unwrap();
            assert!(!client.name().is_empty());
        }
        // Unknown ids resolve to the OpenAI-compatible adapter
        let client = resolve_client(Some("something-else"), Some("sk-test")).unwrap();
        assert_eq!(client.name(), "openai");
    }

    #[test]
    fn test_serde_round_trip() {
        let id: ProviderId = serde_json::from_str("\"groq\"").unwrap();
        assert_eq!(id, ProviderId::Groq);
        assert_eq!(serde_json::to_string(&ProviderId::OpenAi).unwrap(), "\"openai\"");
    }
}

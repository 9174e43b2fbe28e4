//! Generation Endpoint - validates the request, resolves a provider, builds
//! prompts and relays the model's text stream chunk-by-chunk.

use axum::{
    body::Body,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use futures::TryStreamExt;
use serde::Deserialize;
use tracing::info;

use crate::ai::{self, AiError, CompletionRequest};
use crate::prompt::{self, InputMode, OutputFormat, MAX_INPUT_CHARS};

const GENERATION_TEMPERATURE: f32 = 0.5;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub input_mode: InputMode,
    pub input: String,
    pub format: OutputFormat,
    #[serde(default = "default_row_count")]
    pub row_count: i64,
}

fn default_row_count() -> i64 {
    10
}

/// Endpoint-boundary error taxonomy. Every failure is caught here and
/// converted to a JSON envelope; nothing propagates as an unhandled fault.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Missing provider selection.
    #[error("{0}")]
    Config(String),
    /// Missing or empty credential.
    #[error("{0}")]
    Auth(String),
    /// Missing or oversized input.
    #[error("{0}")]
    Validation(String),
    /// Provider or network failure during setup or streaming.
    #[error("{0}")]
    Upstream(String),
    /// A failure that carries no message.
    #[error("An unknown error occurred")]
    Unknown,
}

impl GenerateError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GenerateError::Config(_) | GenerateError::Validation(_) => StatusCode::BAD_REQUEST,
            GenerateError::Auth(_) => StatusCode::UNAUTHORIZED,
            GenerateError::Upstream(_) | GenerateError::Unknown => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<AiError> for GenerateError {
    fn from(e: AiError) -> Self {
        match e {
            AiError::MissingProvider => GenerateError::Config(e.to_string()),
            AiError::MissingApiKey(_) => GenerateError::Auth(e.to_string()),
            other => {
                let message = other.to_string();
                if message.is_empty() {
                    GenerateError::Unknown
                } else {
                    GenerateError::Upstream(message)
                }
            }
        }
    }
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// POST /api/generate
///
/// Request lifecycle: received -> validated -> provider-resolved ->
/// model-invoked -> streaming -> completed | failed. The response body is
/// the model's raw textual output forwarded verbatim as it arrives.
///
/// The body is parsed after the header checks so that a missing provider or
/// credential is reported even when the body is unusable; a malformed body
/// itself surfaces as a 500 envelope like any other caught failure.
pub async fn handler(headers: HeaderMap, body: String) -> Result<Response, GenerateError> {
    let provider = header_value(&headers, "x-provider");
    let api_key = header_value(&headers, "x-api-key");

    // Both provider and credential are required before any model call.
    let client = ai::resolve_client(provider, api_key)?;

    let request: GenerateRequest =
        serde_json::from_str(&body).map_err(|e| GenerateError::Upstream(e.to_string()))?;

    if request.input.is_empty() {
        return Err(GenerateError::Validation("Input is required".to_string()));
    }
    if request.input.chars().count() > MAX_INPUT_CHARS {
        return Err(GenerateError::Validation(
            "Input exceeds 1000 characters limit.".to_string(),
        ));
    }

    // Row count is clamped silently inside the prompt builder.
    let prompts = prompt::build_prompts(
        request.format,
        request.input_mode,
        &request.input,
        request.row_count,
    );

    info!(
        "Generating {} mock data via {}",
        request.format.as_str(),
        client.name()
    );

    let stream = client
        .stream_completion(CompletionRequest {
            system: prompts.system,
            prompt: prompts.user,
            temperature: GENERATION_TEMPERATURE,
        })
        .await?;

    // Relay chunks as they arrive; no buffering and no post-hoc shape
    // validation. Dropping the body (caller abort) drops the upstream
    // response with it.
    let body = Body::from_stream(stream.map_ok(Bytes::from));
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response())
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

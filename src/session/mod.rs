//! Client session state for one generation workbench.
//!
//! The session owns the streamed output buffer exclusively: it is created
//! empty when a generation starts, appended to in arrival order, and cleared
//! on failure so a stale partial result is never confused with a new attempt.
//! Provider keys live only inside the session object and are never persisted
//! or logged.

use std::collections::HashMap;
use serde_json::Value;

use crate::ai::ProviderId;
use crate::prompt::{InputMode, OutputFormat, MAX_INPUT_CHARS};
use crate::transform;

const DEFAULT_SCHEMA_INPUT: &str = "interface User {\n  id: number;\n  name: string;\n  email: string;\n  createdAt: Date;\n}";

/// Session-level errors surfaced before any request leaves the client.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please enter some input before generating!")]
    EmptyInput,
    #[error("Please add your API key in Settings (top right gear).")]
    MissingKey,
}

pub struct GeneratorSession {
    pub input_mode: InputMode,
    pub natural_language_input: String,
    pub schema_input: String,
    pub row_count: i64,
    pub output_format: OutputFormat,
    pub output: String,
    pub error: Option<String>,
    pub is_loading: bool,
    pub active_provider: ProviderId,
    provider_keys: HashMap<ProviderId, String>,
}

impl GeneratorSession {
    pub fn new() -> Self {
        Self {
            input_mode: InputMode::NaturalLanguage,
            natural_language_input: String::new(),
            schema_input: DEFAULT_SCHEMA_INPUT.to_string(),
            row_count: 10,
            output_format: OutputFormat::Json,
            output: String::new(),
            error: None,
            is_loading: false,
            active_provider: ProviderId::OpenAi,
            provider_keys: HashMap::new(),
        }
    }

    /// Store a key for this session only.
    pub fn set_provider_key(&mut self, provider: ProviderId, key: String) {
        self.provider_keys.insert(provider, key);
    }

    pub fn provider_key(&self, provider: ProviderId) -> Option<&str> {
        self.provider_keys.get(&provider).map(String::as_str)
    }

    /// The input the active mode would send, truncated to the server's
    /// character limit. The server-side check stays authoritative.
    pub fn active_input(&self) -> String {
        let raw = match self.input_mode {
            InputMode::NaturalLanguage => &self.natural_language_input,
            InputMode::Schema => &self.schema_input,
        };
        raw.chars().take(MAX_INPUT_CHARS).collect()
    }

    /// Start a new generation: validates local preconditions, then resets
    /// the output buffer and error slot.
    pub fn begin(&mut self) -> Result<(), SessionError> {
        if self.active_input().trim().is_empty() {
            return Err(SessionError::EmptyInput);
        }
        if self.provider_key(self.active_provider).is_none() {
            return Err(SessionError::MissingKey);
        }
        self.is_loading = true;
        self.error = None;
        self.output.clear();
        Ok(())
    }

    /// Append one streamed chunk in arrival order.
    pub fn append_chunk(&mut self, chunk: &str) {
        self.output.push_str(chunk);
    }

    pub fn complete(&mut self) {
        self.is_loading = false;
    }

    /// Record a failure verbatim and discard any partial output.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.output.clear();
        self.is_loading = false;
    }

    fn parsed_records(&self) -> Option<Vec<Value>> {
        serde_json::from_str(&self.output).ok()
    }

    /// Render the current tab from the captured JSON buffer, locally.
    /// Falls back to the raw buffer while streaming or when the buffer is
    /// not a JSON array.
    pub fn display_content(&self) -> String {
        match self.output_format {
            OutputFormat::Json => self
                .parsed_records()
                .map(|records| transform::to_json_pretty(&records))
                .unwrap_or_else(|| self.output.clone()),
            OutputFormat::Sql => self
                .parsed_records()
                .filter(|records| !records.is_empty())
                .map(|records| transform::to_sql(&records, transform::DEFAULT_TABLE))
                .unwrap_or_else(|| self.output.clone()),
            OutputFormat::Csv => self
                .parsed_records()
                .filter(|records| !records.is_empty())
                .map(|records| transform::to_csv(&records))
                .unwrap_or_else(|| self.output.clone()),
        }
    }
}

impl Default for GeneratorSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_session() -> GeneratorSession {
        let mut session = GeneratorSession::new();
        session.natural_language_input = "10 users".to_string();
        session.set_provider_key(ProviderId::OpenAi, "sk-test".to_string());
        session
    }

    #[test]
    fn test_begin_requires_input() {
        let mut session = GeneratorSession::new();
        session.input_mode = InputMode::NaturalLanguage;
        session.set_provider_key(ProviderId::OpenAi, "sk-test".to_string());
        assert_eq!(session.begin().unwrap_err(), SessionError::EmptyInput);
    }

    #[test]
    fn test_begin_requires_key_for_active_provider() {
        let mut session = GeneratorSession::new();
        session.natural_language_input = "10 users".to_string();
        session.set_provider_key(ProviderId::Groq, "gsk-test".to_string());
        assert_eq!(session.begin().unwrap_err(), SessionError::MissingKey);

        session.active_provider = ProviderId::Groq;
        assert!(session.begin().is_ok());
    }

    #[test]
    fn test_begin_resets_previous_run() {
        let mut session = ready_session();
        session.output = "old output".to_string();
        session.error = Some("old error".to_string());
        session.begin().unwrap();
        assert!(session.output.is_empty());
        assert!(session.error.is_none());
        assert!(session.is_loading);
    }

    #[test]
    fn test_chunks_append_in_order() {
        let mut session = ready_session();
        session.begin().unwrap();
        session.append_chunk("[{\"id\":");
        session.append_chunk("1}]");
        session.complete();
        assert_eq!(session.output, "[{\"id\":1}]");
        assert!(!session.is_loading);
    }

    #[test]
    fn test_fail_clears_partial_output() {
        let mut session = ready_session();
        session.begin().unwrap();
        session.append_chunk("[{\"id\":");
        session.fail("HTTP Error: 500");
        assert_eq!(session.error.as_deref(), Some("HTTP Error: 500"));
        assert!(session.output.is_empty());
    }

    #[test]
    fn test_display_content_rerenders_locally() {
        let mut session = ready_session();
        session.begin().unwrap();
        session.append_chunk(r#"[{"id":1,"name":"Alice"}]"#);
        session.complete();

        session.output_format = OutputFormat::Csv;
        assert_eq!(session.display_content(), "id,name\n1,Alice");

        session.output_format = OutputFormat::Sql;
        assert_eq!(
            session.display_content(),
            "INSERT INTO mock_data (id, name) VALUES (1, 'Alice');"
        );

        session.output_format = OutputFormat::Json;
        assert!(session.display_content().contains("\"name\": \"Alice\""));
    }

    #[test]
    fn test_display_content_falls_back_to_raw_buffer() {
        let mut session = ready_session();
        session.begin().unwrap();
        session.append_chunk("[{\"id\":1,");
        session.output_format = OutputFormat::Csv;
        // Mid-stream the buffer is not valid JSON yet
        assert_eq!(session.display_content(), "[{\"id\":1,");
    }

    #[test]
    fn test_active_input_truncates_to_limit() {
        let mut session = GeneratorSession::new();
        session.natural_language_input = "x".repeat(MAX_INPUT_CHARS + 50);
        assert_eq!(session.active_input().chars().count(), MAX_INPUT_CHARS);
    }
}

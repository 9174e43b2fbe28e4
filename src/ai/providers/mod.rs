//! Provider adapters, one per wire protocol.
//!
//! Every adapter speaks Server-Sent Events: the response body arrives as
//! byte chunks that do not respect line boundaries, so `data:` payloads are
//! reassembled through [`SseLineBuffer`] before JSON extraction.

pub mod openai;
pub mod claude;
pub mod gemini;

use futures::StreamExt;
use serde_json::Value;

use crate::ai::provider::{AiError, CompletionStream};

/// Reassembles SSE `data:` payload lines from arbitrarily split byte chunks.
pub(crate) struct SseLineBuffer {
    buf: Vec<u8>,
}

impl SseLineBuffer {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Feed one byte chunk; returns the `data:` payloads completed by it.
    /// Comment lines, blank lines and the `[DONE]` sentinel are dropped.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut out = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let Ok(line) = std::str::from_utf8(&line) else {
                continue;
            };
            let line = line.trim();
            if line.is_empty() || line.starts_with(':') {
                continue;
            }
            if let Some(data) = line.strip_prefix("data:") {
                let data = data.trim_start();
                if data != "[DONE]" {
                    out.push(data.to_string());
                }
            }
        }
        out
    }
}

/// Fail fast with the upstream error body when the provider rejects the call.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
    provider: &str,
) -> Result<reqwest::Response, AiError> {
    let status = response.status();
    if !status.is_success() {
        let detail = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AiError::ProviderUnavailable(format!(
            "{}: HTTP {}: {}",
            provider,
            status.as_u16(),
            detail
        )));
    }
    Ok(response)
}

/// Turn an SSE response into a stream of text fragments using the adapter's
/// payload extractor. Payloads the extractor does not recognize are skipped
/// (role deltas, usage frames, stop events).
pub(crate) fn delta_stream(
    response: reqwest::Response,
    extract: fn(&Value) -> Option<String>,
) -> CompletionStream {
    let mut lines = SseLineBuffer::new();
    let stream = response
        .bytes_stream()
        .map(move |chunk| match chunk {
            Ok(bytes) => lines.push(&bytes).into_iter().map(Ok).collect::<Vec<_>>(),
            Err(e) => vec![Err(AiError::Http(e.to_string()))],
        })
        .flat_map(futures::stream::iter)
        .filter_map(move |item| {
            futures::future::ready(match item {
                Ok(data) => serde_json::from_str::<Value>(&data)
                    .ok()
                    .as_ref()
                    .and_then(extract)
                    .map(Ok),
                Err(e) => Some(Err(e)),
            })
        });
    Box::pin(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sse_buffer_complete_lines() {
        let mut buf = SseLineBuffer::new();
        let payloads = buf.push(b"data: {\"a\":1}\n\ndata: {\"b\":2}\n");
        assert_eq!(payloads, vec!["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn test_sse_buffer_split_across_chunks() {
        let mut buf = SseLineBuffer::new();
        assert!(buf.push(b"data: {\"text\":\"he").is_empty());
        let payloads = buf.push(b"llo\"}\n");
        assert_eq!(payloads, vec!["{\"text\":\"hello\"}"]);
    }

    #[test]
    fn test_sse_buffer_drops_done_and_comments() {
        let mut buf = SseLineBuffer::new();
        let payloads = buf.push(b": keep-alive\ndata: {\"a\":1}\ndata: [DONE]\n");
        assert_eq!(payloads, vec!["{\"a\":1}"]);
    }

    #[test]
    fn test_sse_buffer_multibyte_split() {
        let mut buf = SseLineBuffer::new();
        let bytes = "data: {\"text\":\"caf\u{e9}\"}\n".as_bytes();
        // Split inside the two-byte UTF-8 sequence
        let cut = bytes.len() - 4;
        assert!(buf.push(&bytes[..cut]).is_empty());
        let payloads = buf.push(&bytes[cut..]);
        assert_eq!(payloads, vec!["{\"text\":\"caf\u{e9}\"}"]);
    }
}

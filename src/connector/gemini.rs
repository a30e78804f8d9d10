//! Streaming connector for the Gemini generateContent API.
//!
//! Talks to the `streamGenerateContent` endpoint with `alt=sse` and turns
//! the `data:` event lines into [`AnswerChunk`]s. Dropping the returned
//! stream drops the response body, which closes the connection.

use futures_util::StreamExt;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use super::{AnswerChunk, AnswerStream, CompletionReason, LlmConnector, build_prompt};
use crate::config::FETCH_TIMEOUT;
use crate::errors::AssistantError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiConnector {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiConnector {
    /// Fails fast when the credential or model identifier is blank.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, AssistantError> {
        let api_key = api_key.into();
        let model = model.into();
        if api_key.trim().is_empty() || model.trim().is_empty() {
            return Err(AssistantError::Configuration(
                "API key and model identifier are required".to_string(),
            ));
        }
        let client = Client::builder().connect_timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the connector at a different host (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse&key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

#[async_trait::async_trait]
impl LlmConnector for GeminiConnector {
    async fn stream_answer(
        &self,
        question: &str,
        context: &str,
        source_url: &str,
    ) -> Result<AnswerStream, AssistantError> {
        let prompt = build_prompt(question, context, source_url);
        let body = json!({
            "contents": [
                { "role": "user", "parts": [{ "text": prompt }] },
                { "role": "model", "parts": [{ "text": "Answer:" }] }
            ]
        });

        let response = self.client.post(self.endpoint()).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            debug!(%status, detail, "model service rejected the request");
            return Err(AssistantError::from_http_status(status.as_u16(), detail));
        }

        let stream = response
            .bytes_stream()
            .scan(Vec::new(), |buffer, chunk| {
                let items: Vec<Result<AnswerChunk, AssistantError>> = match chunk {
                    Ok(bytes) => {
                        buffer.extend_from_slice(&bytes);
                        drain_sse_events(buffer).into_iter().map(Ok).collect()
                    }
                    Err(err) => vec![Err(AssistantError::from(err))],
                };
                futures_util::future::ready(Some(futures_util::stream::iter(items)))
            })
            .flatten()
            .boxed();
        Ok(stream)
    }
}

/// Drain complete SSE lines from the buffer and parse their payloads.
/// Partial lines stay buffered until the next network chunk completes them.
/// The buffer holds raw bytes: transport chunks can split a multi-byte
/// UTF-8 character, so decoding happens per complete line only.
fn drain_sse_events(buffer: &mut Vec<u8>) -> Vec<AnswerChunk> {
    let mut chunks = Vec::new();
    while let Some(newline) = buffer.iter().position(|byte| *byte == b'\n') {
        let line: Vec<u8> = buffer.drain(..=newline).collect();
        let Ok(line) = std::str::from_utf8(&line) else {
            continue;
        };
        let line = line.trim();
        let Some(payload) = line.strip_prefix("data:") else {
            continue;
        };
        let payload = payload.trim();
        if payload.is_empty() || payload == "[DONE]" {
            continue;
        }
        if let Some(chunk) = parse_stream_payload(payload) {
            chunks.push(chunk);
        }
    }
    chunks
}

/// Extract text and finish reason from one streamed JSON payload.
fn parse_stream_payload(payload: &str) -> Option<AnswerChunk> {
    let value: Value = serde_json::from_str(payload).ok()?;
    let candidate = value.get("candidates")?.get(0)?;

    let mut text = String::new();
    if let Some(parts) = candidate
        .get("content")
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
    {
        for part in parts {
            if let Some(fragment) = part.get("text").and_then(Value::as_str) {
                text.push_str(fragment);
            }
        }
    }

    let finish = candidate
        .get("finishReason")
        .and_then(Value::as_str)
        .map(CompletionReason::from_api);

    Some(AnswerChunk { text, finish })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_settings_are_rejected() {
        assert!(matches!(
            GeminiConnector::new("", "gemini-1.5-flash"),
            Err(AssistantError::Configuration(_))
        ));
        assert!(matches!(
            GeminiConnector::new("key", "  "),
            Err(AssistantError::Configuration(_))
        ));
    }

    #[test]
    fn sse_lines_parse_into_chunks() {
        let mut buffer =
            b"data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"Hello\"}]}}]}\n\
              data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\" world\"}]},\"finishReason\":\"STOP\"}]}\n"
                .to_vec();
        let chunks = drain_sse_events(&mut buffer);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "Hello");
        assert_eq!(chunks[0].finish, None);
        assert_eq!(chunks[1].text, " world");
        assert_eq!(chunks[1].finish, Some(CompletionReason::Stop));
        assert!(buffer.is_empty());
    }

    #[test]
    fn partial_lines_stay_buffered() {
        let mut buffer = b"data: {\"candidates\":[{\"content\":".to_vec();
        assert!(drain_sse_events(&mut buffer).is_empty());
        assert!(!buffer.is_empty());

        buffer.extend_from_slice(b"{\"parts\":[{\"text\":\"late\"}]}}]}\n");
        let chunks = drain_sse_events(&mut buffer);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "late");
    }

    #[test]
    fn multibyte_characters_split_across_chunks_decode_intact() {
        let line = "data: {\"candidates\":[{\"content\":{\"parts\":[{\"text\":\"café au lait\"}]}}]}\n";
        let bytes = line.as_bytes();
        // Split between the two bytes of 'é' (0xC3 0xA9).
        let split = bytes.iter().position(|b| *b == 0xC3).unwrap() + 1;

        let mut buffer = bytes[..split].to_vec();
        assert!(drain_sse_events(&mut buffer).is_empty());

        buffer.extend_from_slice(&bytes[split..]);
        let chunks = drain_sse_events(&mut buffer);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "café au lait");
        assert!(buffer.is_empty());
    }

    #[test]
    fn done_markers_and_comments_are_skipped() {
        let mut buffer = b": keep-alive\ndata: [DONE]\ndata:\n\n".to_vec();
        assert!(drain_sse_events(&mut buffer).is_empty());
        assert!(buffer.is_empty());
    }

    #[test]
    fn unparseable_payloads_are_dropped() {
        let mut buffer = b"data: not json\n".to_vec();
        assert!(drain_sse_events(&mut buffer).is_empty());
    }
}

//! Model connector seam.
//!
//! The orchestrator streams answers through the [`LlmConnector`] trait;
//! [`gemini::GeminiConnector`] is the production implementation. Prompt
//! construction lives here so every connector frames questions the same way.

pub mod gemini;

pub use gemini::GeminiConnector;

use std::fmt;

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::config::CONTEXT_MAX_LENGTH;
use crate::errors::AssistantError;

/// Why the model stopped emitting tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionReason {
    /// Natural end of the answer.
    Stop,
    /// Output limit reached; the answer may be truncated.
    MaxTokens,
    /// The model's safety layer cut the answer off.
    Safety,
    /// Anything else the API reported (or nothing at all).
    Other(String),
}

impl CompletionReason {
    /// Stop and max-tokens are acceptable ends; everything else warrants a
    /// warning to the user.
    pub fn is_normal(&self) -> bool {
        matches!(self, Self::Stop | Self::MaxTokens)
    }

    /// Map the API's finish-reason string.
    pub fn from_api(raw: &str) -> Self {
        match raw {
            "STOP" => Self::Stop,
            "MAX_TOKENS" => Self::MaxTokens,
            "SAFETY" => Self::Safety,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for CompletionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stop => f.write_str("stop"),
            Self::MaxTokens => f.write_str("max tokens"),
            Self::Safety => f.write_str("safety"),
            Self::Other(raw) => write!(f, "other ({raw})"),
        }
    }
}

/// One streamed fragment of an answer. The final fragment of a stream
/// carries the completion reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerChunk {
    pub text: String,
    pub finish: Option<CompletionReason>,
}

impl AnswerChunk {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish: None,
        }
    }

    pub fn finished(text: impl Into<String>, reason: CompletionReason) -> Self {
        Self {
            text: text.into(),
            finish: Some(reason),
        }
    }
}

/// Streamed answer fragments in arrival order.
pub type AnswerStream = BoxStream<'static, Result<AnswerChunk, AssistantError>>;

/// Seam to the model service. Dropping the returned stream must release the
/// underlying connection so cancellation stops network consumption.
#[async_trait]
pub trait LlmConnector: Send + Sync {
    async fn stream_answer(
        &self,
        question: &str,
        context: &str,
        source_url: &str,
    ) -> Result<AnswerStream, AssistantError>;
}

/// Build the grounded prompt: domain framing, the context (truncated to
/// [`CONTEXT_MAX_LENGTH`] characters) attributed to its source URL, and the
/// literal question.
pub fn build_prompt(question: &str, context: &str, source_url: &str) -> String {
    let truncated: String = context.chars().take(CONTEXT_MAX_LENGTH).collect();
    format!(
        "You are an expert assistant for ARCAD Software products. Your main goal is to answer \
         the user's question based on the provided context.\n\
         \n\
         Here are your instructions:\n\
         1. Carefully read the user's question and the context below. The context is from \
         {source_url}.\n\
         2. Provide a clear, concise, and helpful answer to the question using only the \
         information from the context.\n\
         3. If the context does not contain an answer, state that you couldn't find the \
         information in the provided source. Do not make up information.\n\
         4. After your main answer, check if the context contains any GitHub URLs.\n\
         5. If you find one or more GitHub URLs, add a \"## Further Reading\" section at the \
         end and list them in markdown format. If no GitHub links are present, do not add this \
         section.\n\
         \n\
         Context:\n\
         ---\n\
         {truncated}\n\
         ---\n\
         \n\
         Question: \"{question}\"\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_question_context_and_source() {
        let prompt = build_prompt("What is ARCAD?", "Some page text.", "https://example.test/");
        assert!(prompt.contains("Question: \"What is ARCAD?\""));
        assert!(prompt.contains("Some page text."));
        assert!(prompt.contains("The context is from https://example.test/"));
    }

    #[test]
    fn context_is_truncated_to_the_limit() {
        let context = "x".repeat(CONTEXT_MAX_LENGTH) + "TAIL";
        let prompt = build_prompt("q", &context, "https://example.test/");
        assert!(prompt.contains(&"x".repeat(CONTEXT_MAX_LENGTH)));
        assert!(!prompt.contains("TAIL"));
    }

    #[test]
    fn finish_reason_mapping() {
        assert_eq!(CompletionReason::from_api("STOP"), CompletionReason::Stop);
        assert_eq!(
            CompletionReason::from_api("MAX_TOKENS"),
            CompletionReason::MaxTokens
        );
        assert_eq!(CompletionReason::from_api("SAFETY"), CompletionReason::Safety);
        assert!(CompletionReason::from_api("STOP").is_normal());
        assert!(CompletionReason::from_api("MAX_TOKENS").is_normal());
        assert!(!CompletionReason::from_api("SAFETY").is_normal());
        assert!(!CompletionReason::from_api("RECITATION").is_normal());
    }
}

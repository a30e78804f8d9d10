//! Error taxonomy for the assistant core.
//!
//! Every failure the pipeline can surface is represented here so the
//! orchestrator can make one decision per error: retry it, surface it, or
//! treat it as a neutral pause. Raw error detail stays in the variants (and in
//! the tracing log); user-facing strings come from [`AssistantError::user_message`].

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for the question pipeline.
#[derive(Debug, Error, Diagnostic)]
pub enum AssistantError {
    /// Missing or invalid configuration (credential, model identifier).
    ///
    /// Non-retriable. Blocks LLM-backed paths; local catalog and
    /// conversational answers keep working.
    #[error("configuration error: {0}")]
    #[diagnostic(
        code(arcad_assistant::configuration),
        help("Set the API key and model identifier in the assistant settings.")
    )]
    Configuration(String),

    /// Fetch failure or timeout while talking to the web or the model API.
    #[error("network failure: {message}")]
    #[diagnostic(code(arcad_assistant::network))]
    Network {
        message: String,
        /// Whether the failure was a request timeout.
        timed_out: bool,
    },

    /// Transient overload signal from the model service (HTTP 503 or an
    /// explicit overload message). Retried with backoff by the orchestrator.
    #[error("model overloaded: {0}")]
    #[diagnostic(code(arcad_assistant::overloaded))]
    Overloaded(String),

    /// HTTP 429 from the model service. Surfaced immediately, never retried.
    #[error("rate limited: {0}")]
    #[diagnostic(code(arcad_assistant::rate_limited))]
    RateLimited(String),

    /// The user cancelled the in-flight question. Not an error from the
    /// user's point of view; surfaced as a neutral pause notice.
    #[error("request cancelled")]
    #[diagnostic(code(arcad_assistant::cancelled))]
    Cancelled,
}

impl AssistantError {
    /// Network failure helper.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            timed_out: false,
        }
    }

    /// True for errors the retry loop is allowed to retry.
    pub fn is_overloaded(&self) -> bool {
        matches!(self, Self::Overloaded(_))
    }

    /// Classify a non-success HTTP response from the model service.
    ///
    /// 503 and bodies mentioning overload are transient; 429 is a hard rate
    /// limit; everything else is a plain network failure.
    pub fn from_http_status(status: u16, detail: String) -> Self {
        match status {
            429 => Self::RateLimited(detail),
            503 => Self::Overloaded(detail),
            _ if detail.to_lowercase().contains("overload") => Self::Overloaded(detail),
            _ => Self::network(format!("HTTP {status}: {detail}")),
        }
    }

    /// Friendly paraphrase shown to the user. Raw detail is logged only.
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration(_) => "I need a quick check of my settings. Could you please \
                 verify the API key and model in the assistant settings?"
                .to_string(),
            Self::Network { timed_out: true, .. } => "I apologize, but I'm having trouble \
                 accessing the latest product information. Please try your question again, or \
                 you can visit www.arcadsoftware.com directly."
                .to_string(),
            Self::Network { .. } => "I encountered a connection issue. Could you please try \
                 your question again in a moment?"
                .to_string(),
            Self::Overloaded(_) => "I'm experiencing high demand right now. Please try your \
                 question again in a few moments."
                .to_string(),
            Self::RateLimited(_) => "I'm processing quite a few requests at the moment. Could \
                 you give me a quick moment to catch up?"
                .to_string(),
            Self::Cancelled => "Okay, I've stopped that answer.".to_string(),
        }
    }
}

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            match status.as_u16() {
                429 => return Self::RateLimited(err.to_string()),
                503 => return Self::Overloaded(err.to_string()),
                _ => {}
            }
        }
        Self::Network {
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overload_classification_covers_status_and_message() {
        assert!(AssistantError::from_http_status(503, "busy".into()).is_overloaded());
        assert!(
            AssistantError::from_http_status(500, "The model is overloaded".into())
                .is_overloaded()
        );
        assert!(!AssistantError::from_http_status(429, "slow down".into()).is_overloaded());
        assert!(!AssistantError::from_http_status(404, "missing".into()).is_overloaded());
    }

    #[test]
    fn rate_limit_is_not_retriable() {
        let err = AssistantError::from_http_status(429, "quota".into());
        assert!(matches!(err, AssistantError::RateLimited(_)));
        assert!(!err.is_overloaded());
    }

    #[test]
    fn user_messages_never_leak_raw_detail() {
        let err = AssistantError::network("connect error: 10.0.0.1:443 refused");
        assert!(!err.user_message().contains("10.0.0.1"));

        let err = AssistantError::Overloaded("upstream said: overloaded_error".into());
        assert!(!err.user_message().contains("overloaded_error"));
    }
}

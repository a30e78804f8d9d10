//! Assistant configuration and pipeline tunables.
//!
//! [`AssistantConfig`] carries the user-provided settings (credential, model,
//! context URLs); the module-level constants are the fixed pipeline tunables.
//! Configuration is validated lazily: local answering works with a blank
//! credential, only the streaming path calls [`AssistantConfig::validate`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::AssistantError;

/// Maximum number of streaming attempts per question.
pub const MAX_RETRIES: u32 = 3;

/// Backoff before attempt `n + 1` is `INITIAL_BACKOFF_MS * 2^(n - 1)`.
pub const INITIAL_BACKOFF_MS: u64 = 1000;

/// Hard timeout on each context fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Extracted context shorter than this triggers the fallback fetch.
pub const MIN_CONTEXT_LENGTH: usize = 200;

/// Context is truncated to this many characters before prompting.
pub const CONTEXT_MAX_LENGTH: usize = 8000;

/// How long extracted page text stays cached.
pub const CACHE_TTL: Duration = Duration::from_secs(300);

/// Default context source: the vendor's product listing page.
pub const DEFAULT_PRODUCTS_URL: &str = "https://www.arcadsoftware.com/arcad/products/";

/// Secondary context source when the primary yields too little text.
pub const DEFAULT_FALLBACK_URL: &str = "https://github.com/ARCAD-Software";

/// User-tunable settings for the assistant core.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// API credential for the model service.
    pub api_key: String,
    /// Model identifier, e.g. `gemini-1.5-flash`.
    pub model: String,
    /// Context URL used when no product or locale URL applies.
    pub default_context_url: String,
    /// Secondary URL fetched when extracted context is too short.
    pub fallback_context_url: String,
    /// Starter prompts offered by the UI.
    pub prompt_suggestions: Vec<String>,
}

impl AssistantConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            default_context_url: DEFAULT_PRODUCTS_URL.to_string(),
            fallback_context_url: DEFAULT_FALLBACK_URL.to_string(),
            prompt_suggestions: default_prompt_suggestions(),
        }
    }

    pub fn with_default_context_url(mut self, url: impl Into<String>) -> Self {
        self.default_context_url = url.into();
        self
    }

    pub fn with_fallback_context_url(mut self, url: impl Into<String>) -> Self {
        self.fallback_context_url = url.into();
        self
    }

    pub fn with_prompt_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.prompt_suggestions = suggestions;
        self
    }

    /// Check the settings the streaming path depends on.
    ///
    /// Blank credential or model is a hard configuration error; local
    /// catalog and conversational answers do not call this.
    pub fn validate(&self) -> Result<(), AssistantError> {
        if self.api_key.trim().is_empty() {
            return Err(AssistantError::Configuration(
                "API key is not set".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(AssistantError::Configuration(
                "model identifier is not set".to_string(),
            ));
        }
        Ok(())
    }

    /// Load settings from the environment (with `.env` support).
    ///
    /// Reads `ARCAD_ASSISTANT_API_KEY`, `ARCAD_ASSISTANT_MODEL`, and the
    /// optional `ARCAD_ASSISTANT_CONTEXT_URL` override.
    pub fn from_env() -> Result<Self, AssistantError> {
        let _ = dotenvy::dotenv();
        let api_key = std::env::var("ARCAD_ASSISTANT_API_KEY").map_err(|_| {
            AssistantError::Configuration("ARCAD_ASSISTANT_API_KEY is not set".to_string())
        })?;
        let model = std::env::var("ARCAD_ASSISTANT_MODEL").map_err(|_| {
            AssistantError::Configuration("ARCAD_ASSISTANT_MODEL is not set".to_string())
        })?;
        let mut config = Self::new(api_key, model);
        if let Ok(url) = std::env::var("ARCAD_ASSISTANT_CONTEXT_URL") {
            config.default_context_url = url;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Starter prompts shown before the first question.
pub fn default_prompt_suggestions() -> Vec<String> {
    [
        "How can ARCAD-Skipper help analyze my IBM i applications?",
        "What are ARCAD's DevOps solutions for IBM i?",
        "Compare ARCAD-Transformer RPG vs DB features",
        "How to integrate ARCAD products with Jenkins pipeline?",
        "Show me ARCAD's database modernization solutions",
        "What are the system requirements for ARCAD-Deliver?",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_credential_fails_validation() {
        let config = AssistantConfig::new("  ", "gemini-1.5-flash");
        assert!(matches!(
            config.validate(),
            Err(AssistantError::Configuration(_))
        ));
    }

    #[test]
    fn blank_model_fails_validation() {
        let config = AssistantConfig::new("key", "");
        assert!(matches!(
            config.validate(),
            Err(AssistantError::Configuration(_))
        ));
    }

    #[test]
    fn builders_override_defaults() {
        let config = AssistantConfig::new("key", "model")
            .with_default_context_url("https://example.test/docs")
            .with_fallback_context_url("https://example.test/fallback");
        assert!(config.validate().is_ok());
        assert_eq!(config.default_context_url, "https://example.test/docs");
        assert_eq!(config.fallback_context_url, "https://example.test/fallback");
        assert!(!config.prompt_suggestions.is_empty());
    }
}

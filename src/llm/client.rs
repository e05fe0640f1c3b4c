//! LLM Client abstractions and provider selection
//!
//! Two providers back the registry's chat handles:
//! - **Ollama**: the locally hosted primary model
//! - **Groq**: the optional cloud model, reached through its OpenAI-compatible
//!   API (requires the `groq` feature)

use crate::types::Result;
use crate::utils::config::{PrimaryLlmConfig, SecondaryLlmConfig};
use async_trait::async_trait;
use std::sync::Arc;

#[cfg(not(feature = "groq"))]
use crate::types::AppError;

/// Generic LLM client trait for provider abstraction
///
/// Handles are built once by the registry and shared as
/// `Arc<dyn LLMClient>`; construction never contacts the server.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate with system prompt
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Generate with conversation history
    async fn generate_with_history(
        &self,
        messages: &[(String, String)], // (role, content) pairs
    ) -> Result<String>;

    /// Stream a completion
    async fn stream(
        &self,
        prompt: &str,
    ) -> Result<Box<dyn futures::Stream<Item = Result<String>> + Send + Unpin>>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;

    /// Endpoint address the handle was configured with
    fn base_url(&self) -> &str;

    /// Sampling temperature sent with every request
    fn temperature(&self) -> f32;
}

/// Provider enum for runtime selection
#[derive(Debug, Clone)]
pub enum Provider {
    /// Ollama local LLM provider
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::Ollama {
    ///     base_url: "http://localhost:11434".to_string(),
    ///     model: "llama3.2:latest".to_string(),
    ///     temperature: 0.8,
    /// };
    /// ```
    Ollama {
        base_url: String,
        model: String,
        temperature: f32,
    },

    /// Groq cloud provider (OpenAI-compatible API)
    Groq {
        api_key: String,
        api_base: String,
        model: String,
        temperature: f32,
    },
}

impl Provider {
    /// Describe the primary handle
    pub fn from_primary(config: &PrimaryLlmConfig) -> Self {
        Provider::Ollama {
            base_url: config.endpoint().to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    /// Describe the secondary handle. A missing key becomes an empty one;
    /// the provider rejects it on first use.
    pub fn from_secondary(config: &SecondaryLlmConfig) -> Self {
        Provider::Groq {
            api_key: config.api_key.clone().unwrap_or_default(),
            api_base: config.api_base.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    /// Create a client instance for this provider
    ///
    /// # Errors
    ///
    /// Returns an error if the provider was not compiled in
    pub fn create_client(&self) -> Result<Arc<dyn LLMClient>> {
        match self {
            Provider::Ollama {
                base_url,
                model,
                temperature,
            } => Ok(Arc::new(super::ollama::OllamaClient::new(
                base_url.clone(),
                model.clone(),
                *temperature,
            ))),

            #[cfg(feature = "groq")]
            Provider::Groq {
                api_key,
                api_base,
                model,
                temperature,
            } => Ok(Arc::new(super::groq::GroqClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
                *temperature,
            ))),

            #[cfg(not(feature = "groq"))]
            Provider::Groq { model, .. } => Err(AppError::Configuration(format!(
                "Groq provider requested for model '{}' but the 'groq' feature is not enabled",
                model
            ))),
        }
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Ollama { .. } => "Ollama",
            Provider::Groq { .. } => "Groq",
        }
    }

    /// Whether the provider runs on LawboxAI's own hosts
    pub fn is_local(&self) -> bool {
        matches!(self, Provider::Ollama { .. })
    }
}

use crate::llm::client::LLMClient;
use crate::types::{AppError, MessageRole, Result};
use crate::utils::config::parse_endpoint;
use async_stream::stream;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use ollama_rs::{
    generation::chat::{request::ChatMessageRequest, ChatMessage},
    models::ModelOptions,
    Ollama,
};
use tracing::{debug, warn};

/// Chat handle for an Ollama server.
///
/// The endpoint is recorded verbatim. A value without a scheme is reached
/// over plain `http`; a blank or unusable value falls back to the library's
/// default address, so construction never fails. Reporting bad values is
/// the job of [`RegistryConfig::validate`](crate::RegistryConfig::validate).
pub struct OllamaClient {
    client: Ollama,
    base_url: String,
    model: String,
    temperature: f32,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String, temperature: f32) -> Self {
        let client = if base_url.trim().is_empty() {
            debug!("No Ollama endpoint configured, using library default");
            Ollama::default()
        } else {
            match parse_endpoint(&base_url) {
                Ok(url) => Ollama::from_url(url),
                Err(reason) => {
                    warn!(
                        "Unusable Ollama endpoint '{}' ({}), using library default",
                        base_url, reason
                    );
                    Ollama::default()
                }
            }
        };

        Self {
            client,
            base_url,
            model,
            temperature,
        }
    }

    fn request(&self, messages: Vec<ChatMessage>) -> ChatMessageRequest {
        ChatMessageRequest::new(self.model.clone(), messages)
            .options(ModelOptions::default().temperature(self.temperature))
    }

    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let response = self
            .client
            .send_chat_messages(self.request(messages))
            .await
            .map_err(|e| AppError::LLM(format!("Ollama error: {}", e)))?;

        Ok(response.message.content)
    }
}

#[async_trait]
impl LLMClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.chat(vec![ChatMessage::user(prompt.to_string())])
            .await
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.chat(vec![
            ChatMessage::system(system.to_string()),
            ChatMessage::user(prompt.to_string()),
        ])
        .await
    }

    async fn generate_with_history(&self, messages: &[(String, String)]) -> Result<String> {
        let chat_messages: Vec<ChatMessage> = messages
            .iter()
            .map(|(role, content)| match MessageRole::parse(role) {
                MessageRole::System => ChatMessage::system(content.clone()),
                MessageRole::Assistant => ChatMessage::assistant(content.clone()),
                MessageRole::User => ChatMessage::user(content.clone()),
            })
            .collect();

        self.chat(chat_messages).await
    }

    async fn stream(
        &self,
        prompt: &str,
    ) -> Result<Box<dyn Stream<Item = Result<String>> + Send + Unpin>> {
        let request = self.request(vec![ChatMessage::user(prompt.to_string())]);

        let mut stream_response = self
            .client
            .send_chat_messages_stream(request)
            .await
            .map_err(|e| AppError::LLM(format!("Ollama stream error: {}", e)))?;

        let output_stream = stream! {
            while let Some(chunk_result) = stream_response.next().await {
                match chunk_result {
                    Ok(chunk) => {
                        let content = chunk.message.content;
                        if !content.is_empty() {
                            yield Ok(content);
                        }
                    }
                    Err(_) => {
                        yield Err(AppError::LLM("Stream chunk error".to_string()));
                        break;
                    }
                }
            }
        };

        Ok(Box::new(Box::pin(output_stream)))
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }
}

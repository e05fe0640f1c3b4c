use crate::llm::client::LLMClient;
use crate::types::{AppError, MessageRole, Result};
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessage, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use futures::StreamExt;

/// Chat handle for Groq's OpenAI-compatible endpoint.
pub struct GroqClient {
    client: Client<OpenAIConfig>,
    api_base: String,
    model: String,
    temperature: f32,
}

impl GroqClient {
    pub fn new(api_key: String, api_base: String, model: String, temperature: f32) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base.clone());

        Self {
            client: Client::with_config(config),
            api_base,
            model,
            temperature,
        }
    }

    fn request(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<CreateChatCompletionRequest> {
        CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(self.temperature)
            .messages(messages)
            .build()
            .map_err(|e| AppError::LLM(format!("Failed to build request: {}", e)))
    }

    async fn chat(&self, messages: Vec<ChatCompletionRequestMessage>) -> Result<String> {
        let response = self
            .client
            .chat()
            .create(self.request(messages)?)
            .await
            .map_err(|e| AppError::LLM(format!("Groq API error: {}", e)))?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| AppError::LLM("No response from Groq".to_string()))
    }
}

fn user(content: &str) -> ChatCompletionRequestMessage {
    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(
        content.to_string(),
    ))
}

fn system(content: &str) -> ChatCompletionRequestMessage {
    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage::from(
        content.to_string(),
    ))
}

fn assistant(content: &str) -> ChatCompletionRequestMessage {
    ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage::from(
        content.to_string(),
    ))
}

#[async_trait]
impl LLMClient for GroqClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.chat(vec![user(prompt)]).await
    }

    async fn generate_with_system(&self, system_prompt: &str, prompt: &str) -> Result<String> {
        self.chat(vec![system(system_prompt), user(prompt)]).await
    }

    async fn generate_with_history(&self, messages: &[(String, String)]) -> Result<String> {
        let chat_messages: Vec<ChatCompletionRequestMessage> = messages
            .iter()
            .map(|(role, content)| match MessageRole::parse(role) {
                MessageRole::System => system(content),
                MessageRole::Assistant => assistant(content),
                MessageRole::User => user(content),
            })
            .collect();

        self.chat(chat_messages).await
    }

    async fn stream(
        &self,
        prompt: &str,
    ) -> Result<Box<dyn futures::Stream<Item = Result<String>> + Send + Unpin>> {
        let request = self.request(vec![user(prompt)])?;

        let mut stream = self
            .client
            .chat()
            .create_stream(request)
            .await
            .map_err(|e| AppError::LLM(format!("Groq API error: {}", e)))?;

        let result_stream = async_stream::stream! {
            while let Some(result) = stream.next().await {
                match result {
                    Ok(response) => {
                        for choice in response.choices {
                            if let Some(content) = choice.delta.content {
                                yield Ok(content);
                            }
                        }
                    }
                    Err(e) => {
                        yield Err(AppError::LLM(format!("Stream error: {}", e)));
                    }
                }
            }
        };

        Ok(Box::new(Box::pin(result_stream)))
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn base_url(&self) -> &str {
        &self.api_base
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_model_and_temperature() {
        let client = GroqClient::new(
            "gsk-test".to_string(),
            "https://api.groq.com/openai/v1".to_string(),
            "llama-3.3-70b-versatile".to_string(),
            0.0,
        );

        let request = client.request(vec![user("hello")]).unwrap();

        assert_eq!(request.model, "llama-3.3-70b-versatile");
        assert_eq!(request.temperature, Some(0.0));
        assert_eq!(client.base_url(), "https://api.groq.com/openai/v1");
    }
}

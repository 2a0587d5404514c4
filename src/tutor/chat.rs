//! Chat completion backends.

use crate::config::Settings;
use crate::error::{Result, TutorError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// A single-turn chat request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Trait for chat completion backends.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the request and return the first text segment of the reply.
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}

/// OpenAI chat completions backend.
pub struct OpenAIChat {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
}

impl OpenAIChat {
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            client: create_client(settings)?,
        })
    }
}

#[async_trait]
impl ChatModel for OpenAIChat {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system.clone())
                .build()
                .map_err(|e| TutorError::Tutor(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.user.clone())
                .build()
                .map_err(|e| TutorError::Tutor(e.to_string()))?
                .into(),
        ];

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(messages)
            .temperature(request.temperature)
            .max_completion_tokens(request.max_tokens)
            .build()
            .map_err(|e| TutorError::Tutor(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(chat_request)
            .await
            .map_err(|e| TutorError::OpenAI(format!("Failed to generate response: {}", e)))?;

        let answer = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| TutorError::Tutor("Empty response from LLM".to_string()))?
            .clone();

        debug!("Received {} chars from LLM", answer.chars().count());
        Ok(answer)
    }
}

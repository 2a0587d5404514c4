//! Tutor answer generation.

use super::chat::{ChatModel, ChatRequest};
use super::context::build_context;
use crate::config::{Prompts, TutorSettings};
use crate::error::{Result, TutorError};
use crate::transcript::Transcript;
use serde_json::Number;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Answers single questions about a video. Holds no conversation state.
pub struct TutorAnswerer {
    model: Arc<dyn ChatModel>,
    settings: TutorSettings,
    prompts: Prompts,
}

impl TutorAnswerer {
    /// Create a new answerer.
    pub fn new(model: Arc<dyn ChatModel>, settings: TutorSettings) -> Self {
        Self {
            model,
            settings,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Build the chat request for a question without sending it.
    pub fn build_request(
        &self,
        question: &str,
        video_title: &str,
        current_time: &Number,
        transcript: Option<&Transcript>,
    ) -> ChatRequest {
        let context = build_context(video_title, current_time, transcript);

        let mut vars = HashMap::new();
        vars.insert("question".to_string(), question.to_string());
        vars.insert("context".to_string(), context);

        ChatRequest {
            model: self.settings.model.clone(),
            system: self.prompts.tutor.system.clone(),
            user: self.prompts.render_with_custom(&self.prompts.tutor.user, &vars),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }

    /// Answer a question about a video.
    #[instrument(skip(self, transcript), fields(has_transcript = transcript.is_some()))]
    pub async fn answer(
        &self,
        question: &str,
        video_title: &str,
        current_time: &Number,
        transcript: Option<&Transcript>,
    ) -> Result<String> {
        if question.trim().is_empty() {
            return Err(TutorError::InvalidInput("Question is required".to_string()));
        }

        let request = self.build_request(question, video_title, current_time, transcript);
        let answer = self.model.complete(&request).await?;

        info!("AI response generated ({} chars)", answer.chars().count());
        Ok(answer)
    }
}

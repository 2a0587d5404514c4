//! Configuration module for vidtutor.
//!
//! Handles loading application settings, environment overrides, and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, TutorPrompts};
pub use settings::{
    GeneralSettings, OpenAISettings, PromptSettings, ServerSettings, Settings,
    TranscriptSettings, TutorSettings,
};

//! Tutor answers backed by a hosted LLM.
//!
//! Every question is answered independently: the prompt carries the video title,
//! the playback position, and a bounded transcript excerpt.

mod answerer;
mod chat;
pub mod context;

pub use answerer::TutorAnswerer;
pub use chat::{ChatModel, ChatRequest, OpenAIChat};
pub use context::build_context;

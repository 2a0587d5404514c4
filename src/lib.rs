//! vidtutor - AI tutor relay for YouTube videos
//!
//! A small HTTP backend that answers questions about a YouTube video. It fetches
//! the video's transcript once, keeps it in an in-process cache, and forwards a
//! bounded prompt to a hosted LLM.
//!
//! # Architecture
//!
//! - `video_id` - YouTube URL parsing
//! - `transcript` - Transcript fetching and the process-wide cache
//! - `tutor` - Prompt construction and LLM calls
//! - `orchestrator` - Request coordination with typed results
//! - `server` - HTTP routes and error mapping
//! - `config` - Settings and prompt templates
//!
//! # Example
//!
//! ```rust,no_run
//! use vidtutor::config::Settings;
//! use vidtutor::orchestrator::{AskInput, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(&settings)?;
//!
//!     let outcome = orchestrator
//!         .ask(AskInput {
//!             question: "What is this video about?".to_string(),
//!             video_title: "Never Gonna Give You Up".to_string(),
//!             current_time: 0.into(),
//!             video_id: Some("https://youtu.be/dQw4w9WgXcQ".to_string()),
//!         })
//!         .await?;
//!     println!("{}", outcome.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod server;
pub mod transcript;
pub mod tutor;
pub mod video_id;

pub use error::{Result, TutorError};

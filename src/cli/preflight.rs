//! Pre-flight checks before calling upstream services.
//!
//! Validates configuration up front so one-shot commands fail with a clear
//! message instead of an opaque API error.

use crate::config::Settings;
use crate::error::{Result, TutorError};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Asking questions requires an API key.
    Ask,
    /// Fetching transcripts has no local requirements.
    Transcript,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Ask => check_api_key(settings),
        Operation::Transcript => Ok(()),
    }
}

fn check_api_key(settings: &Settings) -> Result<()> {
    if settings.api_key_configured() {
        Ok(())
    } else {
        Err(TutorError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        ))
    }
}

//! Error types for vidtutor.

use thiserror::Error;

/// Library-level error type for vidtutor operations.
#[derive(Error, Debug)]
pub enum TutorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("No transcript available for video {video_id}: {reason}")]
    TranscriptUnavailable { video_id: String, reason: String },

    #[error("Transcript fetch failed: {0}")]
    TranscriptFetch(String),

    #[error("Tutor error: {0}")]
    Tutor(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl TutorError {
    /// Whether the error was caused by the caller rather than by the relay or an upstream.
    pub fn is_validation(&self) -> bool {
        matches!(self, TutorError::InvalidInput(_))
    }

    /// Whether the error means the requested video or transcript does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TutorError::VideoNotFound(_) | TutorError::TranscriptUnavailable { .. }
        )
    }
}

/// Result type alias for vidtutor operations.
pub type Result<T> = std::result::Result<T, TutorError>;

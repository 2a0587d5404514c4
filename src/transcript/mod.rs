//! Transcript retrieval and caching.
//!
//! A [`TranscriptFetcher`] pulls time-coded entries from an upstream service,
//! and the [`TranscriptStore`] keeps the flattened text for the life of the process.

mod store;
mod youtube;

pub use store::{CacheStatus, TranscriptStore};
pub use youtube::YoutubeTranscriptFetcher;

use crate::error::Result;
use async_trait::async_trait;
use std::ops::Deref;
use std::sync::Arc;

/// A single time-coded entry returned by a transcript source.
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    /// Spoken text.
    pub text: String,
    /// Start time in seconds.
    pub start_seconds: f64,
}

impl TranscriptEntry {
    /// Create a new transcript entry.
    pub fn new(text: impl Into<String>, start_seconds: f64) -> Self {
        Self {
            text: text.into(),
            start_seconds,
        }
    }
}

/// Flattened transcript text. Immutable and cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    text: Arc<str>,
    chars: usize,
}

impl Transcript {
    /// Join entry texts with single spaces, in source order.
    pub fn from_entries(entries: &[TranscriptEntry]) -> Self {
        let text = entries
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Self::from(text)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    pub fn char_count(&self) -> usize {
        self.chars
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl From<String> for Transcript {
    fn from(text: String) -> Self {
        let chars = text.chars().count();
        Self {
            text: Arc::from(text),
            chars,
        }
    }
}

impl Deref for Transcript {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

/// Trait for transcript sources.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    /// Fetch the transcript entries for a video ID.
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptEntry>>;
}

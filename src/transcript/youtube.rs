//! YouTube transcript source.

use super::{TranscriptEntry, TranscriptFetcher};
use crate::config::TranscriptSettings;
use crate::error::{Result, TutorError};
use async_trait::async_trait;
use tracing::{debug, instrument};
use yt_transcript_rs::api::YouTubeTranscriptApi;

/// Fetches published captions for YouTube videos.
pub struct YoutubeTranscriptFetcher {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
    preserve_formatting: bool,
}

impl YoutubeTranscriptFetcher {
    /// Create a fetcher with the configured language preferences.
    pub fn new(settings: &TranscriptSettings) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            TutorError::Config(format!("Failed to initialize transcript client: {}", e))
        })?;

        let languages = if settings.languages.is_empty() {
            vec!["en".to_string()]
        } else {
            settings.languages.clone()
        };

        Ok(Self {
            api,
            languages,
            preserve_formatting: settings.preserve_formatting,
        })
    }
}

#[async_trait]
impl TranscriptFetcher for YoutubeTranscriptFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str) -> Result<Vec<TranscriptEntry>> {
        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();

        let fetched = self
            .api
            .fetch_transcript(video_id, &languages, self.preserve_formatting)
            .await
            .map_err(|e| TutorError::TranscriptFetch(format!("{}: {}", video_id, e)))?;

        debug!(
            "Fetched {} transcript snippets ({})",
            fetched.snippets.len(),
            fetched.language_code
        );

        Ok(fetched
            .snippets
            .into_iter()
            .map(|s| TranscriptEntry::new(s.text, s.start))
            .collect())
    }
}

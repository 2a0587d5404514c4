//! Request orchestrator for vidtutor.
//!
//! Coordinates video ID extraction, the transcript cache, and the tutor.
//! Every operation returns a typed result; transport concerns stay in `server`.

use crate::config::{Prompts, Settings};
use crate::error::{Result, TutorError};
use crate::transcript::{
    CacheStatus, Transcript, TranscriptFetcher, TranscriptStore, YoutubeTranscriptFetcher,
};
use crate::tutor::{ChatModel, OpenAIChat, TutorAnswerer};
use crate::video_id::VideoIdExtractor;
use serde_json::Number;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// A question about a video.
#[derive(Debug, Clone)]
pub struct AskInput {
    pub question: String,
    pub video_title: String,
    pub current_time: Number,
    /// Video ID or URL. Empty or unparseable values mean "no transcript".
    pub video_id: Option<String>,
}

/// The tutor's answer plus what the caller echoes back.
#[derive(Debug, Clone)]
pub struct AskOutcome {
    pub answer: String,
    pub video_title: String,
    pub current_time: Number,
    /// Whether the video's transcript is cached after this request.
    pub cached: bool,
}

/// The main orchestrator for the tutor relay.
pub struct Orchestrator {
    extractor: VideoIdExtractor,
    store: TranscriptStore,
    answerer: TutorAnswerer,
    api_key_configured: bool,
}

impl Orchestrator {
    /// Create an orchestrator backed by YouTube captions and OpenAI.
    pub fn new(settings: &Settings) -> Result<Self> {
        let fetcher = Arc::new(YoutubeTranscriptFetcher::new(&settings.transcript)?);
        let model = Arc::new(OpenAIChat::new(settings)?);
        Self::with_components(settings, fetcher, model)
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: &Settings,
        fetcher: Arc<dyn TranscriptFetcher>,
        model: Arc<dyn ChatModel>,
    ) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let answerer = TutorAnswerer::new(model, settings.tutor.clone()).with_prompts(prompts);

        Ok(Self {
            extractor: VideoIdExtractor::new(),
            store: TranscriptStore::new(fetcher),
            answerer,
            api_key_configured: settings.api_key_configured(),
        })
    }

    /// Get the transcript store.
    pub fn store(&self) -> &TranscriptStore {
        &self.store
    }

    pub fn api_key_configured(&self) -> bool {
        self.api_key_configured
    }

    /// Answer a question, using the video's transcript when one can be found.
    #[instrument(skip(self, input), fields(video_id = ?input.video_id))]
    pub async fn ask(&self, input: AskInput) -> Result<AskOutcome> {
        if input.question.trim().is_empty() {
            return Err(TutorError::InvalidInput("Question is required".to_string()));
        }

        info!("Question received: {}", input.question);

        let video_id = input
            .video_id
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .and_then(|raw| {
                let id = self.extractor.extract(raw);
                if id.is_none() {
                    warn!("Could not extract a video ID from {:?}", raw);
                }
                id
            });

        let transcript = match &video_id {
            Some(id) => self.transcript_or_none(id).await,
            None => None,
        };

        let answer = self
            .answerer
            .answer(
                &input.question,
                &input.video_title,
                &input.current_time,
                transcript.as_ref(),
            )
            .await?;

        let cached = video_id
            .as_deref()
            .is_some_and(|id| self.store.contains(id));

        Ok(AskOutcome {
            answer,
            video_title: input.video_title,
            current_time: input.current_time,
            cached,
        })
    }

    async fn transcript_or_none(&self, video_id: &str) -> Option<Transcript> {
        match self.store.get_or_fetch(video_id).await {
            Ok(transcript) => Some(transcript),
            Err(e) => {
                warn!("Answering without transcript: {}", e);
                None
            }
        }
    }

    /// Fetch and cache a transcript ahead of questions. Returns its length in characters.
    #[instrument(skip(self))]
    pub async fn prefetch_transcript(&self, raw_video_id: &str) -> Result<usize> {
        if raw_video_id.trim().is_empty() {
            return Err(TutorError::InvalidInput("Video ID is required".to_string()));
        }

        let video_id = self.extractor.extract(raw_video_id).ok_or_else(|| {
            TutorError::VideoNotFound(format!("Invalid YouTube video ID or URL: {}", raw_video_id))
        })?;

        let transcript = self.store.get_or_fetch(&video_id).await?;
        Ok(transcript.char_count())
    }

    /// Snapshot of the transcript cache.
    pub fn cache_status(&self) -> CacheStatus {
        self.store.status()
    }

    /// Empty the transcript cache. Returns the number of removed transcripts.
    pub fn clear_cache(&self) -> usize {
        self.store.clear()
    }
}

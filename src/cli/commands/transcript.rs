//! Transcript command implementation.

use crate::cli::output::content_preview;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::video_id::VideoIdExtractor;
use anyhow::Result;

/// Run the transcript command.
pub async fn run_transcript(video: &str, settings: Settings) -> Result<()> {
    preflight::check(Operation::Transcript, &settings)?;

    let orchestrator = Orchestrator::new(&settings)?;

    let spinner = Output::spinner("Fetching transcript...");
    let result = orchestrator.prefetch_transcript(video).await;
    spinner.finish_and_clear();

    let length = match result {
        Ok(length) => length,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    Output::success("Transcript fetched");
    let video_id = VideoIdExtractor::new().extract(video).unwrap_or_default();
    Output::kv("Video ID", &video_id);
    Output::kv("Length", &format!("{} chars", length));

    if let Some(transcript) = orchestrator.store().get(&video_id) {
        Output::kv("Preview", &content_preview(&transcript, 200));
    }

    Ok(())
}

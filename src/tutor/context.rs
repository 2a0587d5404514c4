//! Context building for tutor prompts.

use crate::transcript::Transcript;
use serde_json::Number;

/// Maximum transcript characters included in a prompt.
pub const TRANSCRIPT_CHAR_LIMIT: usize = 3000;

/// Marker appended after the transcript excerpt.
pub const TRANSCRIPT_SUFFIX: &str = "...";

/// Build the context block describing the video and, when available, its transcript.
pub fn build_context(
    video_title: &str,
    current_time: &Number,
    transcript: Option<&Transcript>,
) -> String {
    let mut context = format!("Video: {}\nCurrent time: {}s", video_title, current_time);

    if let Some(transcript) = transcript {
        context.push_str("\nTranscript: ");
        context.push_str(truncate_chars(transcript, TRANSCRIPT_CHAR_LIMIT));
        context.push_str(TRANSCRIPT_SUFFIX);
    }

    context
}

/// Return at most `max_chars` leading characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

//! Ask command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{AskInput, Orchestrator};
use anyhow::Result;
use serde_json::Number;

/// Run the ask command.
pub async fn run_ask(
    question: &str,
    video: Option<String>,
    title: &str,
    time: f64,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Ask, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(&settings)?;

    let input = AskInput {
        question: question.to_string(),
        video_title: title.to_string(),
        current_time: seconds_to_number(time),
        video_id: video,
    };

    let spinner = Output::spinner("Asking the tutor...");

    match orchestrator.ask(input).await {
        Ok(outcome) => {
            spinner.finish_and_clear();
            println!("\n{}\n", outcome.answer);
            if !outcome.cached {
                Output::info("Answered without a transcript.");
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}

/// Whole seconds render as integers (`42s`), others keep their fraction.
fn seconds_to_number(seconds: f64) -> Number {
    if seconds.fract() == 0.0 && (0.0..=u64::MAX as f64).contains(&seconds) {
        Number::from(seconds as u64)
    } else {
        Number::from_f64(seconds).unwrap_or_else(|| Number::from(0))
    }
}

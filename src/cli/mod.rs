//! CLI module for vidtutor.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// vidtutor - AI tutor for YouTube videos
///
/// Serves a small HTTP API that answers questions about a video using its transcript.
#[derive(Parser, Debug)]
#[command(name = "vidtutor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Defaults to `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server (default)
    Serve {
        /// Host to bind to [default: server.host from config]
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to [default: $PORT or server.port from config]
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Ask a single question from the command line
    Ask {
        /// The question to ask
        question: String,

        /// YouTube URL or video ID to pull the transcript from
        #[arg(long)]
        video: Option<String>,

        /// Video title included in the prompt
        #[arg(short, long, default_value = "")]
        title: String,

        /// Playback position in seconds
        #[arg(long, default_value = "0")]
        time: f64,
    },

    /// Fetch a video's transcript and show its size
    Transcript {
        /// YouTube URL or video ID
        video: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}

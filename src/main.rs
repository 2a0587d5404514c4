//! vidtutor CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vidtutor::cli::{commands, Cli, Commands};
use vidtutor::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration file; the environment overlay is applied once logging is up
    let config_path = cli.config.as_ref().map(std::path::PathBuf::from);
    let mut settings = Settings::load_file(config_path.as_ref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("vidtutor={},tower_http={}", log_level, log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    for ignored in settings.apply_env(|key| std::env::var(key).ok()) {
        tracing::warn!("{}", ignored);
    }

    match cli.command {
        None => {
            commands::run_serve(None, None, settings).await?;
        }

        Some(Commands::Serve { host, port }) => {
            commands::run_serve(host, port, settings).await?;
        }

        Some(Commands::Ask {
            question,
            video,
            title,
            time,
        }) => {
            commands::run_ask(&question, video, &title, time, settings).await?;
        }

        Some(Commands::Transcript { video }) => {
            commands::run_transcript(&video, settings).await?;
        }

        Some(Commands::Config { action }) => {
            commands::run_config(&action, settings)?;
        }
    }

    Ok(())
}

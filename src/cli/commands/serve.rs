//! Serve command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::server::{self, AppState};

/// Run the HTTP API server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let orchestrator = Orchestrator::new(&settings)?;
    let state = AppState::new(orchestrator);

    Output::header("YouTube AI Tutor API");
    println!();
    Output::success(&format!("Listening on http://{}:{}", host, port));
    if !settings.api_key_configured() {
        Output::warning("OPENAI_API_KEY is not set; questions will fail until it is configured.");
    }
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Ask", "POST /api/tutor/ask");
    Output::kv("Transcript", "POST /api/tutor/transcript");
    Output::kv("Cache status", "GET  /api/tutor/cache-status");
    Output::kv("Clear cache", "POST /api/tutor/clear-cache");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    server::serve(&host, port, state).await
}

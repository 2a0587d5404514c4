//! HTTP API for the tutor relay.
//!
//! Maps JSON requests onto [`Orchestrator`] operations and converts typed
//! errors into HTTP status codes with a `{ "error": ... }` body.

use crate::error::TutorError;
use crate::orchestrator::{AskInput, Orchestrator};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

/// Shared application state.
pub struct AppState {
    pub orchestrator: Orchestrator,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Arc<Self> {
        Arc::new(Self { orchestrator })
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/tutor/ask", post(ask))
        .route("/api/tutor/transcript", post(transcript))
        .route("/api/tutor/cache-status", get(cache_status))
        .route("/api/tutor/clear-cache", post(clear_cache))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to `host:port` and serve until the process exits.
pub async fn serve(host: &str, port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AskRequest {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    video_title: Option<String>,
    #[serde(default)]
    current_time: Option<Number>,
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AskResponse {
    answer: String,
    video_title: String,
    current_time: Number,
    cached: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranscriptRequest {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Serialize)]
struct TranscriptResponse {
    success: bool,
    message: String,
    length: usize,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    message: &'static str,
    api_key_configured: bool,
    cached_videos: usize,
}

#[derive(Serialize)]
struct CacheStatusResponse {
    cached_videos: usize,
    video_ids: Vec<String>,
    total_cache_size: usize,
}

#[derive(Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

fn bad_request(rejection: JsonRejection) -> Response {
    debug!("Rejected request body: {}", rejection.body_text());
    error_response(
        StatusCode::BAD_REQUEST,
        format!("Invalid request body: {}", rejection.body_text()),
    )
}

/// Convert a core error into a response. `context` prefixes server-side failures.
fn tutor_error_response(err: TutorError, context: &str) -> Response {
    if err.is_validation() {
        debug!("Validation error: {}", err);
        let message = match err {
            TutorError::InvalidInput(message) => message,
            other => other.to_string(),
        };
        return error_response(StatusCode::BAD_REQUEST, message);
    }

    if err.is_not_found() {
        info!("Not found: {}", err);
        return error_response(StatusCode::NOT_FOUND, err.to_string());
    }

    let message = format!("{}: {}", context, err);
    error!("{}", message);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
}

// === Handlers ===

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        message: "YouTube AI Tutor API is running",
        api_key_configured: state.orchestrator.api_key_configured(),
        cached_videos: state.orchestrator.store().len(),
    })
}

async fn ask(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection),
    };

    let input = AskInput {
        question: req.question.unwrap_or_default(),
        video_title: req.video_title.unwrap_or_default(),
        current_time: req.current_time.unwrap_or_else(|| Number::from(0)),
        video_id: req.video_id,
    };

    match state.orchestrator.ask(input).await {
        Ok(outcome) => Json(AskResponse {
            answer: outcome.answer,
            video_title: outcome.video_title,
            current_time: outcome.current_time,
            cached: outcome.cached,
        })
        .into_response(),
        Err(e) => tutor_error_response(e, "Error processing request"),
    }
}

async fn transcript(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TranscriptRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return bad_request(rejection),
    };

    let video_id = req.video_id.unwrap_or_default();

    match state.orchestrator.prefetch_transcript(&video_id).await {
        Ok(length) => Json(TranscriptResponse {
            success: true,
            message: "Transcript cached successfully".to_string(),
            length,
        })
        .into_response(),
        Err(e) if e.is_not_found() => {
            info!("{}", e);
            error_response(
                StatusCode::NOT_FOUND,
                "No transcript available for this video".to_string(),
            )
        }
        Err(e) => tutor_error_response(e, "Failed to get transcript"),
    }
}

async fn cache_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let status = state.orchestrator.cache_status();
    Json(CacheStatusResponse {
        cached_videos: status.count,
        video_ids: status.video_ids,
        total_cache_size: status.total_chars,
    })
}

async fn clear_cache(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let removed = state.orchestrator.clear_cache();
    Json(MessageResponse {
        message: format!("Cache cleared. Removed {} cached transcripts.", removed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::testing::{orchestrator, FakeFetcher, FakeModel};
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn make_app(fetcher: Arc<FakeFetcher>, model: Arc<FakeModel>) -> Router {
        router(AppState::new(orchestrator(fetcher, model)))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let app = make_app(FakeFetcher::with(vec![]), FakeModel::answering());

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["api_key_configured"], false);
        assert_eq!(body["cached_videos"], 0);
    }

    #[tokio::test]
    async fn test_ask_without_question_returns_400() {
        let model = FakeModel::answering();
        let app = make_app(FakeFetcher::with(vec![]), model.clone());

        let (status, body) = send(&app, "POST", "/api/tutor/ask", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Question is required");
        assert!(model.requests().is_empty());
    }

    #[tokio::test]
    async fn test_ask_malformed_body_returns_400() {
        let app = make_app(FakeFetcher::with(vec![]), FakeModel::answering());

        let req = Request::builder()
            .method("POST")
            .uri("/api/tutor/ask")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ask_when_transcript_fetch_fails() {
        let model = FakeModel::answering();
        let app = make_app(FakeFetcher::with(vec![]), model.clone());

        let (status, body) = send(
            &app,
            "POST",
            "/api/tutor/ask",
            Some(json!({
                "question": "What is this about?",
                "videoId": "abc12345678",
                "videoTitle": "Demo"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "Here is a short explanation.");
        assert_eq!(body["videoTitle"], "Demo");
        assert_eq!(body["currentTime"], 0);
        assert_eq!(body["cached"], false);

        let requests = model.requests();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].user.contains("Transcript:"));
    }

    #[tokio::test]
    async fn test_ask_with_transcript_reports_cached() {
        let model = FakeModel::answering();
        let app = make_app(
            FakeFetcher::with(vec![("abc12345678", "lecture about graphs")]),
            model.clone(),
        );

        let (status, body) = send(
            &app,
            "POST",
            "/api/tutor/ask",
            Some(json!({
                "question": "What is a vertex?",
                "videoId": "abc12345678",
                "currentTime": 95.5
            })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cached"], true);
        assert_eq!(body["currentTime"], 95.5);
        assert!(model.requests()[0]
            .user
            .contains("Current time: 95.5s\nTranscript: lecture about graphs..."));
    }

    #[tokio::test]
    async fn test_ask_upstream_failure_returns_500() {
        let app = make_app(FakeFetcher::with(vec![]), FakeModel::failing());

        let (status, body) = send(
            &app,
            "POST",
            "/api/tutor/ask",
            Some(json!({ "question": "Why?" })),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("Error processing request:"));
        assert!(error.contains("timeout"));
    }

    #[tokio::test]
    async fn test_transcript_endpoint() {
        let app = make_app(
            FakeFetcher::with(vec![("abc12345678", "hello there")]),
            FakeModel::answering(),
        );

        let (status, body) = send(&app, "POST", "/api/tutor/transcript", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Video ID is required");

        let (status, body) = send(
            &app,
            "POST",
            "/api/tutor/transcript",
            Some(json!({ "videoId": "zzzzzzzzzzz" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No transcript available for this video");

        let (status, body) = send(
            &app,
            "POST",
            "/api/tutor/transcript",
            Some(json!({ "videoId": "abc12345678" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["length"], 11);
    }

    #[tokio::test]
    async fn test_cache_status_and_clear() {
        let app = make_app(
            FakeFetcher::with(vec![("abc12345678", "hello there")]),
            FakeModel::answering(),
        );

        send(
            &app,
            "POST",
            "/api/tutor/transcript",
            Some(json!({ "videoId": "abc12345678" })),
        )
        .await;

        let (status, body) = send(&app, "GET", "/api/tutor/cache-status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cached_videos"], 1);
        assert_eq!(body["video_ids"], json!(["abc12345678"]));
        assert_eq!(body["total_cache_size"], 11);

        let (status, body) = send(&app, "POST", "/api/tutor/clear-cache", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Cache cleared. Removed 1 cached transcripts.");

        let (_, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(body["cached_videos"], 0);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let app = make_app(FakeFetcher::with(vec![]), FakeModel::answering());

        let req = Request::builder()
            .method("GET")
            .uri("/health")
            .header("origin", "chrome-extension://abcdefghijklmnop")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}

//! HTTP API server for integration with other systems.
//!
//! Exposes one shared Q&A session over REST endpoints. A mutex serializes
//! actions on the session, so concurrent requests are applied one at a time.

use crate::assistant::Assistant;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::AsktubeError;
use crate::session::{ConversationTurn, LastFailure, Phase, SessionState};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

/// Shared application state.
struct AppState {
    assistant: Assistant,
    session: Mutex<SessionState>,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Ask, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'asktube doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let assistant = Assistant::new(settings)?;

    let state = Arc::new(AppState {
        assistant,
        session: Mutex::new(SessionState::new()),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/state", get(session_state))
        .route("/fetch", post(fetch))
        .route("/ask", post(ask))
        .route("/clear", post(clear))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("asktube API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Session state", "GET  /state");
    Output::kv("Load video", "POST /fetch");
    Output::kv("Ask", "POST /ask");
    Output::kv("Clear session", "POST /clear");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct FetchRequest {
    /// YouTube URL or video ID
    url: String,
}

#[derive(Serialize)]
struct FetchResponse {
    video: String,
    title: String,
    language: String,
    chars: usize,
}

#[derive(Deserialize)]
struct AskRequest {
    question: String,
}

#[derive(Serialize)]
struct StateResponse {
    phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    video: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<String>,
    transcript_chars: usize,
    history: Vec<ConversationTurn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_failure: Option<LastFailure>,
}

impl StateResponse {
    fn from_session(session: &SessionState) -> Self {
        Self {
            phase: session.phase(),
            video: session.video().map(|v| v.to_string()),
            title: session.transcript().map(|t| t.title.clone()),
            language: session.transcript().map(|t| t.language.clone()),
            transcript_chars: session.transcript().map(|t| t.char_count()).unwrap_or(0),
            history: session.history().to_vec(),
            last_failure: session.last_failure().cloned(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    kind: String,
}

/// Map an error to the HTTP status its kind deserves.
fn error_status(err: &AsktubeError) -> StatusCode {
    match err.kind() {
        "parse" => StatusCode::BAD_REQUEST,
        "no_captions" | "transcripts_disabled" | "video_unavailable" => StatusCode::NOT_FOUND,
        "no_video" => StatusCode::CONFLICT,
        "quota" => StatusCode::TOO_MANY_REQUESTS,
        "fetch_network" | "answer_network" | "model" => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: &AsktubeError) -> (StatusCode, Json<ErrorResponse>) {
    (
        error_status(err),
        Json(ErrorResponse {
            error: err.to_string(),
            kind: err.kind().to_string(),
        }),
    )
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn session_state(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let session = state.session.lock().await;
    Json(StateResponse::from_session(&session))
}

async fn fetch(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FetchRequest>,
) -> impl IntoResponse {
    // Hold the lock for the whole action so fetches apply atomically
    let mut session = state.session.lock().await;

    match state.assistant.load_video(&mut session, &req.url).await {
        Ok(outcome) => Json(FetchResponse {
            video: outcome.video.to_string(),
            title: outcome.title,
            language: outcome.language,
            chars: outcome.chars,
        })
        .into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> impl IntoResponse {
    let mut session = state.session.lock().await;

    match state.assistant.ask(&mut session, &req.question).await {
        Ok(turn) => Json(turn).into_response(),
        Err(e) => error_response(&e).into_response(),
    }
}

async fn clear(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut session = state.session.lock().await;
    state.assistant.clear(&mut session);
    Json(serde_json::json!({ "status": "cleared" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AnswerError, FetchError, ParseError};

    #[test]
    fn test_error_status_mapping() {
        let parse = AsktubeError::from(ParseError {
            input: "nope".to_string(),
        });
        assert_eq!(error_status(&parse), StatusCode::BAD_REQUEST);

        let missing = AsktubeError::from(FetchError::NoCaptions("abcdefghijk".to_string()));
        assert_eq!(error_status(&missing), StatusCode::NOT_FOUND);

        let no_video = AsktubeError::NoVideoLoaded;
        assert_eq!(error_status(&no_video), StatusCode::CONFLICT);

        let quota = AsktubeError::from(AnswerError::Quota("billing".to_string()));
        assert_eq!(error_status(&quota), StatusCode::TOO_MANY_REQUESTS);

        let upstream = AsktubeError::from(AnswerError::Network("timeout".to_string()));
        assert_eq!(error_status(&upstream), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_state_response_reports_empty_session() {
        let response = StateResponse::from_session(&SessionState::new());
        assert_eq!(response.phase, Phase::Empty);
        assert!(response.video.is_none());
        assert_eq!(response.transcript_chars, 0);
        assert!(response.history.is_empty());
    }
}

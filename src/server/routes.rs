// REST API routes for the playlist generator and chat assistant
// Both relay handlers make at most one upstream call per request.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use super::AppState;
use crate::ai::{
    ASSISTANT_PROMPT, Conformance, Message, OpenAiClient, PLAYLIST_PROMPT, Playlist, ResponseMode,
    system_prompt,
};
use crate::error::ApiError;

// ---- Request/Response types ----

#[derive(Debug, Default, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub description: Option<String>,
}

/// Turns are relayed upstream as-is, whatever fields they carry
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub ok: bool,
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub name: String,
    pub version: String,
    pub credential_configured: bool,
}

// ---- Route registration ----

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/generate", post(generate_playlist))
        .route("/api/chat", post(chat))
}

// ---- Handlers ----

/// A body that is missing, not JSON or of the wrong shape reads as the default
fn lenient<T: Default>(payload: Result<Json<T>, JsonRejection>) -> T {
    match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!(error = %rejection, "unreadable request body");
            T::default()
        }
    }
}

fn llm(state: &AppState) -> Result<&OpenAiClient, ApiError> {
    state.llm.as_ref().ok_or(ApiError::MissingCredential)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        name: "LiveMix".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        credential_configured: state.llm.is_some(),
    })
}

pub async fn generate_playlist(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = lenient(payload);
    let description = request.description.as_deref().unwrap_or("").trim();
    if description.is_empty() {
        return Err(ApiError::BadRequest("Description is required"));
    }
    let client = llm(&state)?;

    info!(description_len = description.len(), "generating playlist");

    let messages: [Value; 2] = [
        Message::system(PLAYLIST_PROMPT).into(),
        Message::user(system_prompt::playlist_request(description)).into(),
    ];
    let content = client
        .complete(&messages, ResponseMode::JsonObject)
        .await?
        .ok_or(ApiError::NoContent { raw: None })?;

    let playlist: Value = serde_json::from_str(&content)
        .map_err(|_| ApiError::InvalidJson { raw: content.clone() })?;

    match Playlist::inspect(&playlist) {
        Conformance::Conforms { tracks } => info!(tracks, "playlist generated"),
        Conformance::TooManyTracks { tracks } => {
            warn!(tracks, "playlist exceeds the requested track cap")
        }
        Conformance::Mismatch => warn!("playlist does not match the track schema"),
    }

    Ok(Json(playlist))
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let client = llm(&state)?;
    let request = lenient(payload);
    if request.messages.is_empty() {
        return Err(ApiError::BadRequest("messages array is required"));
    }

    info!(turns = request.messages.len(), "chat message received");

    let mut messages: Vec<Value> = Vec::with_capacity(request.messages.len() + 1);
    messages.push(Message::system(ASSISTANT_PROMPT).into());
    messages.extend(request.messages);

    let reply = client
        .complete(&messages, ResponseMode::Text)
        .await?
        .unwrap_or_default();

    Ok(Json(ChatReply { ok: true, reply }))
}

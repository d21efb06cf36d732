//! Chat handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use log::info;

use crate::ai::ProviderKind;
use crate::error::AppError;
use crate::http::responses::{ChatBody, ChatReply};
use crate::http::state::AppState;

pub const MESSAGE_REQUIRED: &str = "Message is required";

/// `POST /api/chat`, answered by the configured primary provider.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let kind = state.primary;
    respond(&state, kind, body).await
}

/// `POST /api/chat/:provider`.
pub async fn chat_with_provider(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let kind: ProviderKind = provider.parse().map_err(AppError::NotFound)?;
    respond(&state, kind, body).await
}

// Well-formed JSON of the wrong shape is the caller's fault; anything the
// extractor cannot read at all is reported as an internal failure.
fn body_error(e: JsonRejection) -> AppError {
    match e {
        JsonRejection::JsonDataError(_) => AppError::BadRequest(e.body_text()),
        _ => AppError::internal("Failed to process chat request", e.body_text()),
    }
}

async fn respond(
    state: &AppState,
    kind: ProviderKind,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(body) = body.map_err(body_error)?;

    let message = body
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::BadRequest(MESSAGE_REQUIRED.to_string()))?;

    info!(
        "chat via {} ({} history turns)",
        kind,
        body.history.len()
    );
    let resp = state.orchestrator(kind).respond(&body.history, message).await;

    Ok(Json(ChatReply::from(resp)))
}

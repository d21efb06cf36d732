//! HTTP request and response bodies.

use crate::ai::ChatMessage;
use crate::chat::ChatResponse;
use serde::{Deserialize, Serialize};

// ============================================================================
// Chat
// ============================================================================

/// Body of `POST /api/chat`. `message` is optional here so a missing value
/// can be answered with a 400 instead of a rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ChatBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub response: String,
    #[serde(skip_serializing_if = "is_false")]
    pub rate_limited: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub api_key_error: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub used_fallback: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

impl From<ChatResponse> for ChatReply {
    fn from(r: ChatResponse) -> Self {
        Self {
            response: r.text,
            rate_limited: r.rate_limited,
            api_key_error: r.auth_error,
            used_fallback: r.used_fallback,
            sources: r.sources,
        }
    }
}

// ============================================================================
// Dashboard / readings
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardParams {
    pub field_id: Option<i32>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingsParams {
    pub field_id: Option<i32>,
    pub limit: Option<u64>,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct InternalErrorResponse {
    pub error: String,
    pub message: String,
}

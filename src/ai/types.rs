use crate::ai::classify::{classify, ErrorKind};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Prompt sent ahead of the first turn of every conversation.
pub const SYSTEM_PROMPT: &str = "You are a farm water-management assistant. \
Answer only questions about irrigation, soil moisture, water quality, water conservation, \
weather impact on farming and crop water needs. Keep answers short, practical and easy for \
a farmer to follow. If the question is off-topic, politely redirect the farmer to \
irrigation and water-management topics.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "bot", alias = "assistant", alias = "model")]
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ProviderReply {
    pub text: String,
    pub sources: Vec<String>,
}

impl ProviderReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("missing API key {0}")]
    MissingApiKey(&'static str),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("http error: {0}")]
    Http(String),
    #[error("provider error: {0}")]
    Upstream(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("empty reply")]
    EmptyReply,
}

impl ProviderError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Best-effort classification, see [`classify`].
    pub fn kind(&self) -> ErrorKind {
        classify(self.status(), &self.to_string())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        // the url may carry credentials in its query string
        ProviderError::Http(e.without_url().to_string())
    }
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// One chat-completion call. `history` is forwarded in the given order,
    /// followed by `message`.
    async fn send(
        &self,
        system: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<ProviderReply, ProviderError>;
}

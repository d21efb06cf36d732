use crate::ai::{ChatMessage, ErrorKind, LlmProvider, ProviderError, SYSTEM_PROMPT};
use crate::chat::knowledge;
use log::{info, warn};
use std::sync::Arc;

pub const HIGH_DEMAND_MESSAGE: &str =
    "I'm receiving a lot of questions right now due to high demand. Please try again in a few minutes.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatResponse {
    pub text: String,
    pub rate_limited: bool,
    pub auth_error: bool,
    pub used_fallback: bool,
    pub sources: Vec<String>,
}

impl ChatResponse {
    fn answered(text: String, sources: Vec<String>) -> Self {
        Self {
            text,
            sources,
            ..Default::default()
        }
    }

    fn rate_limited() -> Self {
        Self {
            text: HIGH_DEMAND_MESSAGE.to_string(),
            rate_limited: true,
            ..Default::default()
        }
    }

    fn from_knowledge(message: &str, auth_error: bool) -> Self {
        Self {
            text: knowledge::lookup(message),
            auth_error,
            used_fallback: !auth_error,
            ..Default::default()
        }
    }
}

/// Calls one provider and, when it fails, answers from the knowledge base.
///
/// One provider call at most, no retries. `respond` always produces a
/// non-empty answer.
#[derive(Clone)]
pub struct ChatOrchestrator {
    provider: Arc<dyn LlmProvider>,
    system_prompt: String,
}

impl ChatOrchestrator {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn respond(&self, history: &[ChatMessage], message: &str) -> ChatResponse {
        let result = self
            .provider
            .send(&self.system_prompt, history, message)
            .await
            .and_then(|reply| {
                if reply.text.trim().is_empty() {
                    Err(ProviderError::EmptyReply)
                } else {
                    Ok(reply)
                }
            });

        match result {
            Ok(reply) => {
                info!(
                    "{} answered ({} chars, {} sources)",
                    self.provider.name(),
                    reply.text.len(),
                    reply.sources.len()
                );
                ChatResponse::answered(reply.text, reply.sources)
            }
            Err(e) => {
                let kind = e.kind();
                warn!(
                    "{} failed [{}]: {}",
                    self.provider.name(),
                    kind.as_str(),
                    e
                );
                match kind {
                    ErrorKind::RateLimit => ChatResponse::rate_limited(),
                    ErrorKind::AuthFailure => ChatResponse::from_knowledge(message, true),
                    ErrorKind::Transient | ErrorKind::Unknown => {
                        ChatResponse::from_knowledge(message, false)
                    }
                }
            }
        }
    }
}

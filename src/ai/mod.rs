pub mod classify;
pub mod edenai;
pub mod gemini;
pub mod perplexity;
pub mod types;
pub mod unified;

pub use classify::{classify, ErrorKind};
pub use edenai::EdenAiProvider;
pub use gemini::GeminiProvider;
pub use perplexity::PerplexityProvider;
pub use types::{ChatMessage, ChatRole, LlmProvider, ProviderError, ProviderReply, SYSTEM_PROMPT};
pub use unified::{ProviderKind, ProviderSet};

use serde_json::Value;
use std::time::Duration;

pub fn build_llm_http_client(
    proxy: Option<&str>,
    timeout: Option<Duration>,
) -> Result<reqwest::Client, ProviderError> {
    let mut builder = reqwest::Client::builder();

    if let Some(raw) = proxy {
        let t = raw.trim();
        if !t.is_empty() {
            let url = if t.contains("://") {
                t.to_string()
            } else {
                format!("socks5h://{}", t)
            };
            let proxy = reqwest::Proxy::all(&url).map_err(ProviderError::from)?;
            builder = builder.proxy(proxy);
        }
    }
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder.build().map_err(ProviderError::from)
}

/// Reads a provider response, turning non-2xx statuses and bad JSON into errors.
pub(crate) async fn read_json_body(resp: reqwest::Response) -> Result<Value, ProviderError> {
    let status = resp.status();
    let raw = resp.text().await?;

    if !status.is_success() {
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body: raw,
        });
    }

    serde_json::from_str(&raw)
        .map_err(|e| ProviderError::InvalidResponse(format!("json parse failed: {e}, raw={raw}")))
}

use crate::ai::read_json_body;
use crate::ai::types::{ChatMessage, ChatRole, LlmProvider, ProviderError, ProviderReply};
use crate::config::ProviderSettings;
use async_trait::async_trait;
use serde_json::{json, Value};

const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 500;

/// Eden AI routes the chat to an underlying vendor named by `model`
/// (e.g. `openai`), and answers keyed by that vendor name.
#[derive(Clone)]
pub struct EdenAiProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    vendor: String,
    base_url: String,
}

impl EdenAiProvider {
    pub fn new(client: reqwest::Client, settings: &ProviderSettings) -> Self {
        Self {
            client,
            api_key: settings.api_key.clone(),
            vendor: settings.model.clone(),
            base_url: settings.base_url.clone(),
        }
    }
}

pub(crate) fn build_body(
    vendor: &str,
    system: &str,
    history: &[ChatMessage],
    message: &str,
) -> Value {
    let previous: Vec<Value> = history
        .iter()
        .map(|m| {
            let role = match m.role {
                ChatRole::User => "user",
                ChatRole::Assistant => "assistant",
            };
            json!({"role": role, "message": m.content})
        })
        .collect();

    let mut body = json!({
        "providers": vendor,
        "text": message,
        "previous_history": previous,
        "temperature": TEMPERATURE,
        "max_tokens": MAX_TOKENS
    });
    if history.is_empty() {
        body["chatbot_global_action"] = json!(system);
    }
    body
}

pub(crate) fn extract_text(vendor: &str, v: &Value) -> Result<String, ProviderError> {
    let result = v
        .get(vendor)
        .ok_or_else(|| ProviderError::InvalidResponse(format!("missing {vendor} result, raw={v}")))?;

    let status = result.get("status").and_then(|s| s.as_str()).unwrap_or("");
    if status != "success" {
        let msg = result
            .get("error")
            .and_then(|e| e.get("message").or(Some(e)))
            .map(|e| match e {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| format!("status {status}"));
        return Err(ProviderError::Upstream(msg));
    }

    result
        .get("generated_text")
        .and_then(|t| t.as_str())
        .map(|t| t.trim().to_string())
        .ok_or_else(|| ProviderError::InvalidResponse(format!("missing generated_text, raw={v}")))
}

#[async_trait]
impl LlmProvider for EdenAiProvider {
    fn name(&self) -> &'static str {
        "edenai"
    }

    async fn send(
        &self,
        system: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<ProviderReply, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey("EDENAI_API_KEY"))?;
        let url = format!("{}/v2/text/chat", self.base_url.trim_end_matches('/'));
        let body = build_body(&self.vendor, system, history, message);

        let resp = self
            .client
            .post(url)
            .bearer_auth(key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;
        let v = read_json_body(resp).await?;

        Ok(ProviderReply::text(extract_text(&self.vendor, &v)?))
    }
}

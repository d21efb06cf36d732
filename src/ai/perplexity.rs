use crate::ai::read_json_body;
use crate::ai::types::{ChatMessage, ChatRole, LlmProvider, ProviderError, ProviderReply};
use crate::config::ProviderSettings;
use async_trait::async_trait;
use regex::Regex;
use serde_json::{json, Value};
use std::sync::OnceLock;

const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 500;

#[derive(Clone)]
pub struct PerplexityProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl PerplexityProvider {
    pub fn new(client: reqwest::Client, settings: &ProviderSettings) -> Self {
        Self {
            client,
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            base_url: settings.base_url.clone(),
        }
    }
}

pub(crate) fn build_body(
    model: &str,
    system: &str,
    history: &[ChatMessage],
    message: &str,
) -> Value {
    let mut messages = Vec::with_capacity(history.len() + 2);
    if history.is_empty() {
        messages.push(json!({"role": "system", "content": system}));
    }
    for m in history {
        let role = match m.role {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        };
        messages.push(json!({"role": role, "content": m.content}));
    }
    messages.push(json!({"role": "user", "content": message}));

    json!({
        "model": model,
        "temperature": TEMPERATURE,
        "max_tokens": MAX_TOKENS,
        "messages": messages
    })
}

fn citation_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\[\d+\]").expect("valid citation regex"))
}

pub(crate) fn extract_reply(v: &Value) -> Result<ProviderReply, ProviderError> {
    let content = v
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| ProviderError::InvalidResponse(format!("missing choices[0], raw={v}")))?;
    let text = citation_marker().replace_all(content, "").trim().to_string();

    // older responses carry `citations`, newer ones `search_results`
    let mut sources: Vec<String> = v
        .get("citations")
        .and_then(|c| c.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|x| x.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    if sources.is_empty() {
        if let Some(results) = v.get("search_results").and_then(|r| r.as_array()) {
            sources = results
                .iter()
                .filter_map(|r| r.get("url").and_then(|u| u.as_str()).map(str::to_string))
                .collect();
        }
    }

    Ok(ProviderReply { text, sources })
}

#[async_trait]
impl LlmProvider for PerplexityProvider {
    fn name(&self) -> &'static str {
        "perplexity"
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
            .ok_or(ProviderError::MissingApiKey("PERPLEXITY_API_KEY"))?;
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = build_body(&self.model, system, history, message);

        let resp = self
            .client
            .post(url)
            .bearer_auth(key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;
        let v = read_json_body(resp).await?;

        extract_reply(&v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_turns_follow_in_submitted_order() {
        let history = vec![ChatMessage::user("A"), ChatMessage::assistant("B")];
        let body = build_body("sonar", "sys", &history, "C");
        let msgs = body["messages"].as_array().cloned().unwrap_or_default();
        let turns: Vec<(&str, &str)> = msgs
            .iter()
            .map(|m| {
                (
                    m["role"].as_str().unwrap_or_default(),
                    m["content"].as_str().unwrap_or_default(),
                )
            })
            .collect();
        assert_eq!(
            turns,
            vec![("user", "A"), ("assistant", "B"), ("user", "C")]
        );
    }

    #[test]
    fn system_prompt_only_on_first_turn() {
        let body = build_body("sonar", "sys", &[], "hi");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
    }

    #[test]
    fn strips_citation_markers_and_collects_sources() {
        let v = json!({
            "choices": [{"message": {"content": "Irrigate at dawn[1] to cut losses [2]."}}],
            "citations": ["https://a.example", "https://b.example"]
        });
        let reply = extract_reply(&v).unwrap();
        assert_eq!(reply.text, "Irrigate at dawn to cut losses.");
        assert_eq!(reply.sources.len(), 2);
    }

    #[test]
    fn falls_back_to_search_results_urls() {
        let v = json!({
            "choices": [{"message": {"content": "ok"}}],
            "search_results": [{"title": "t", "url": "https://c.example"}]
        });
        assert_eq!(extract_reply(&v).unwrap().sources, vec!["https://c.example"]);
    }
}

mod common;

use std::sync::Arc;

use common::{state_for, state_with, FixedWeather, ScriptedProvider};
use farmwater::ai::{ProviderKind, ProviderSet};
use farmwater::http::{create_router, AppState};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serves the full router on an ephemeral port and returns its base URL.
async fn serve(state: Arc<AppState>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.expect("serve");
    });
    format!("http://{addr}")
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().expect("client")
}

async fn post_raw(url: &str, body: &'static str) -> (StatusCode, Value) {
    let resp = client()
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .expect("request");
    let status = resp.status();
    (status, resp.json().await.expect("json body"))
}

#[tokio::test]
async fn unparseable_chat_body_is_an_internal_error() {
    let provider = ScriptedProvider::answering("gemini", "ok");
    let base = serve(state_for(provider.clone()).await).await;

    let (status, v) = post_raw(&format!("{base}/api/chat"), "not json").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(v["error"], "Failed to process chat request");
    assert!(v["message"].as_str().is_some_and(|m| !m.is_empty()));
    assert!(provider.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn chat_body_without_message_is_a_bad_request() {
    let provider = ScriptedProvider::answering("gemini", "ok");
    let base = serve(state_for(provider.clone()).await).await;

    for body in ["{}", r#"{"message":null}"#, r#"{"message":"   "}"#] {
        let (status, v) = post_raw(&format!("{base}/api/chat"), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(v, json!({ "error": "Message is required" }));
    }
    assert!(provider.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn chat_body_of_the_wrong_shape_is_a_bad_request() {
    let base = serve(state_for(ScriptedProvider::answering("gemini", "ok")).await).await;

    let (status, v) = post_raw(&format!("{base}/api/chat"), r#"{"message":42}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(v["error"].as_str().is_some());

    let (status, _) = post_raw(
        &format!("{base}/api/chat"),
        r#"{"message":"hi","history":[{"role":"system","content":"x"}]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn provider_path_selects_that_provider() {
    let gemini = ScriptedProvider::answering("gemini", "from gemini");
    let perplexity = ScriptedProvider::answering("perplexity", "from perplexity");
    let providers = ProviderSet {
        gemini: gemini.clone(),
        perplexity: perplexity.clone(),
        edenai: ScriptedProvider::answering("edenai", "from edenai"),
    };
    let state = state_with(providers, ProviderKind::Perplexity, FixedWeather(Ok(vec![]))).await;
    let base = serve(state).await;

    let (status, v) = post_raw(&format!("{base}/api/chat/gemini"), r#"{"message":"hi"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v, json!({ "response": "from gemini" }));
    assert_eq!(gemini.calls.lock().unwrap().len(), 1);
    assert!(perplexity.calls.lock().unwrap().is_empty());

    let (status, v) = post_raw(&format!("{base}/api/chat"), r#"{"message":"hi"}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["response"], "from perplexity");

    let (status, v) = post_raw(&format!("{base}/api/chat/nope"), r#"{"message":"hi"}"#).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(v["error"].as_str().is_some());
}

#[tokio::test]
async fn auth_failure_through_the_router_uses_the_knowledge_base() {
    let provider = ScriptedProvider::failing_status("gemini", 401, "unauthorized");
    let base = serve(state_for(provider).await).await;

    let (status, v) = post_raw(
        &format!("{base}/api/chat"),
        r#"{"message":"What about drought?"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["apiKeyError"], true);
    assert!(v["response"]
        .as_str()
        .is_some_and(|r| r.starts_with("During drought, prioritize water for your most valuable crops.")));
}

#[tokio::test]
async fn malformed_query_strings_get_json_errors() {
    let base = serve(state_for(ScriptedProvider::answering("gemini", "ok")).await).await;
    let client = client();

    for path in ["/api/dashboard?lat=abc&lon=77.2", "/api/dashboard?lat=30", "/api/readings?limit=many"] {
        let resp = client
            .get(format!("{base}{path}"))
            .send()
            .await
            .expect("request");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "path {path}");
        let v: Value = resp.json().await.expect("json body");
        assert!(v["error"].as_str().is_some(), "path {path}");
    }

    let resp = client
        .get(format!("{base}/health"))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::OK);
}

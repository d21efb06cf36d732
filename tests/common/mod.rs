#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use farmwater::ai::{ChatMessage, LlmProvider, ProviderError, ProviderKind, ProviderReply, ProviderSet};
use farmwater::dashboard::model::DailyForecast;
use farmwater::dashboard::{AdviceGenerator, DashboardService, WeatherError, WeatherProvider};
use farmwater::http::AppState;
use farmwater::storage;
use serde_json::Value;

pub type Outcome = Box<dyn Fn() -> Result<ProviderReply, ProviderError> + Send + Sync>;

pub struct ScriptedProvider {
    pub label: &'static str,
    outcome: Outcome,
    pub calls: Mutex<Vec<(Vec<ChatMessage>, String)>>,
}

impl ScriptedProvider {
    pub fn new(
        label: &'static str,
        outcome: impl Fn() -> Result<ProviderReply, ProviderError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            label,
            outcome: Box::new(outcome),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn answering(label: &'static str, text: &'static str) -> Arc<Self> {
        Self::new(label, move || Ok(ProviderReply::text(text)))
    }

    pub fn failing_status(label: &'static str, status: u16, body: &'static str) -> Arc<Self> {
        Self::new(label, move || {
            Err(ProviderError::Status {
                status,
                body: body.to_string(),
            })
        })
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        self.label
    }

    async fn send(
        &self,
        _system: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<ProviderReply, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((history.to_vec(), message.to_string()));
        (self.outcome)()
    }
}

pub struct FixedWeather(pub Result<Vec<DailyForecast>, ()>);

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn forecast(&self, _lat: f64, _lon: f64) -> Result<Vec<DailyForecast>, WeatherError> {
        self.0.clone().map_err(|_| WeatherError::MissingApiKey)
    }
}

pub fn rainy_days() -> Vec<DailyForecast> {
    (0..3)
        .map(|day| DailyForecast {
            day,
            date: format!("2024-07-0{}", day + 1),
            temp_min: 24.0,
            temp_max: 31.0,
            humidity: 80.0,
            rain_probability: 0.9,
            description: "moderate rain".to_string(),
        })
        .collect()
}

pub async fn state_with(
    providers: ProviderSet,
    primary: ProviderKind,
    weather: FixedWeather,
) -> Arc<AppState> {
    let db = Arc::new(
        storage::establish_connection("sqlite::memory:")
            .await
            .expect("in-memory database"),
    );
    let advice = AdviceGenerator::new(providers.get(primary));
    let dashboard = DashboardService::new(db.clone(), Arc::new(weather), advice, (28.6, 77.2));
    AppState::new(db, primary, providers, dashboard)
}

pub async fn state_for(provider: Arc<ScriptedProvider>) -> Arc<AppState> {
    state_with(
        ProviderSet::uniform(provider),
        ProviderKind::Gemini,
        FixedWeather(Ok(rainy_days())),
    )
    .await
}

pub async fn body_json(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("readable body");
    serde_json::from_slice(&bytes).expect("json body")
}

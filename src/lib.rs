//! Farm water-management API: chat with provider fallback, dashboard
//! aggregation and farm records.

pub mod ai;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod http;
pub mod storage;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::ai::ProviderSet;
use crate::config::Config;
use crate::dashboard::{AdviceGenerator, DashboardService, OpenWeatherProvider};
use crate::http::AppState;

/// Wires providers, weather and storage into the shared state from `config`.
pub fn build_state(
    config: &Config,
    db: Arc<DatabaseConnection>,
    client: reqwest::Client,
) -> Arc<AppState> {
    let providers = ProviderSet::from_config(client.clone(), config);
    let weather = Arc::new(OpenWeatherProvider::new(
        client,
        config.openweather_api_key.clone(),
        config.openweather_base_url.clone(),
    ));
    let advice = AdviceGenerator::new(providers.get(config.chat_provider));
    let dashboard = DashboardService::new(
        db.clone(),
        weather,
        advice,
        (config.default_lat, config.default_lon),
    );

    AppState::new(db, config.chat_provider, providers, dashboard)
}

use crate::dashboard::model::DailyForecast;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

pub const MAX_DAYS: usize = 5;

#[derive(thiserror::Error, Debug)]
pub enum WeatherError {
    #[error("missing env OPENWEATHER_API_KEY")]
    MissingApiKey,
    #[error("http error: {0}")]
    Http(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Day-indexed forecast, day 0 first.
    async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<DailyForecast>, WeatherError>;
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastSlot>,
}

#[derive(Debug, Deserialize)]
struct ForecastSlot {
    dt_txt: String,
    main: SlotMain,
    #[serde(default)]
    weather: Vec<SlotWeather>,
    #[serde(default)]
    pop: f64,
}

#[derive(Debug, Deserialize)]
struct SlotMain {
    temp_min: f64,
    temp_max: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct SlotWeather {
    description: String,
}

#[derive(Clone)]
pub struct OpenWeatherProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenWeatherProvider {
    pub fn new(client: reqwest::Client, api_key: Option<String>, base_url: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<DailyForecast>, WeatherError> {
        let key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;
        let url = format!("{}/forecast", self.base_url.trim_end_matches('/'));

        let resp = self
            .client
            .get(url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("units", "metric".to_string()),
                ("appid", key.to_string()),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Http(e.without_url().to_string()))?;

        match resp.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(WeatherError::Unauthorized),
            _ => {}
        }

        let status = resp.status();
        let raw = resp
            .text()
            .await
            .map_err(|e| WeatherError::Http(e.without_url().to_string()))?;
        if !status.is_success() {
            return Err(WeatherError::Http(format!("{} {}", status.as_u16(), raw)));
        }

        let parsed: ForecastResponse = serde_json::from_str(&raw)
            .map_err(|e| WeatherError::InvalidResponse(format!("json parse failed: {e}")))?;
        Ok(aggregate_daily(&parsed.list))
    }
}

/// Folds 3-hourly slots into per-day summaries, at most [`MAX_DAYS`].
fn aggregate_daily(slots: &[ForecastSlot]) -> Vec<DailyForecast> {
    let mut by_date: BTreeMap<&str, Vec<&ForecastSlot>> = BTreeMap::new();
    for slot in slots {
        let date = slot.dt_txt.split(' ').next().unwrap_or(&slot.dt_txt);
        by_date.entry(date).or_default().push(slot);
    }

    by_date
        .into_iter()
        .take(MAX_DAYS)
        .enumerate()
        .map(|(day, (date, slots))| {
            let temp_min = slots
                .iter()
                .map(|s| s.main.temp_min)
                .fold(f64::INFINITY, f64::min);
            let temp_max = slots
                .iter()
                .map(|s| s.main.temp_max)
                .fold(f64::NEG_INFINITY, f64::max);
            let humidity = slots.iter().map(|s| s.main.humidity).sum::<f64>() / slots.len() as f64;
            let rain_probability = slots.iter().map(|s| s.pop).fold(0.0, f64::max);

            let mut counts: HashMap<&str, usize> = HashMap::new();
            let mut description = "";
            let mut best = 0;
            for s in &slots {
                if let Some(w) = s.weather.first() {
                    let c = counts.entry(w.description.as_str()).or_insert(0);
                    *c += 1;
                    // ties keep the earliest description
                    if *c > best {
                        best = *c;
                        description = w.description.as_str();
                    }
                }
            }

            DailyForecast {
                day,
                date: date.to_string(),
                temp_min,
                temp_max,
                humidity: humidity.round(),
                rain_probability,
                description: description.to_string(),
            }
        })
        .collect()
}

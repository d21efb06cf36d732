//! Service configuration, read from the environment (and `.env`).

use crate::ai::ProviderKind;
use log::warn;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    /// Model name; for Eden AI the underlying vendor (e.g. `openai`).
    pub model: String,
    pub base_url: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    /// Provider behind `POST /api/chat` and the dashboard advice.
    pub chat_provider: ProviderKind,
    pub gemini: ProviderSettings,
    pub perplexity: ProviderSettings,
    pub edenai: ProviderSettings,
    pub openweather_api_key: Option<String>,
    pub openweather_base_url: String,
    pub default_lat: f64,
    pub default_lon: f64,
    pub llm_proxy: Option<String>,
    pub llm_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            database_url: "sqlite://farmwater.db?mode=rwc".to_string(),
            chat_provider: ProviderKind::Gemini,
            gemini: ProviderSettings {
                api_key: None,
                model: "gemini-1.5-flash".to_string(),
                base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            },
            perplexity: ProviderSettings {
                api_key: None,
                model: "sonar".to_string(),
                base_url: "https://api.perplexity.ai".to_string(),
            },
            edenai: ProviderSettings {
                api_key: None,
                model: "openai".to_string(),
                base_url: "https://api.edenai.run".to_string(),
            },
            openweather_api_key: None,
            openweather_base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            default_lat: 28.6139,
            default_lon: 77.2090,
            llm_proxy: None,
            llm_timeout: None,
        }
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: String) -> String {
    env_opt(key).unwrap_or(default)
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env_opt(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {}={}", key, raw);
            default
        }),
        None => default,
    }
}

impl Config {
    /// Reads the process environment over the defaults. Missing API keys are
    /// not an error; the affected provider answers through the fallback path.
    pub fn from_env() -> Self {
        let d = Config::default();

        let chat_provider = match env_opt("CHAT_PROVIDER") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{}, using {}", e, d.chat_provider);
                d.chat_provider
            }),
            None => d.chat_provider,
        };

        Self {
            bind_addr: env_or("BIND_ADDR", d.bind_addr),
            database_url: env_or("DATABASE_URL", d.database_url),
            chat_provider,
            gemini: ProviderSettings {
                api_key: env_opt("GEMINI_API_KEY"),
                model: env_or("GEMINI_MODEL", d.gemini.model),
                base_url: env_or("GEMINI_BASE_URL", d.gemini.base_url),
            },
            perplexity: ProviderSettings {
                api_key: env_opt("PERPLEXITY_API_KEY"),
                model: env_or("PERPLEXITY_MODEL", d.perplexity.model),
                base_url: env_or("PERPLEXITY_BASE_URL", d.perplexity.base_url),
            },
            edenai: ProviderSettings {
                api_key: env_opt("EDENAI_API_KEY"),
                model: env_or("EDENAI_PROVIDER", d.edenai.model),
                base_url: env_or("EDENAI_BASE_URL", d.edenai.base_url),
            },
            openweather_api_key: env_opt("OPENWEATHER_API_KEY"),
            openweather_base_url: env_or("OPENWEATHER_BASE_URL", d.openweather_base_url),
            default_lat: env_parsed("DEFAULT_LAT", d.default_lat),
            default_lon: env_parsed("DEFAULT_LON", d.default_lon),
            llm_proxy: env_opt("LLM_PROXY"),
            llm_timeout: env_opt("LLM_TIMEOUT_SECS")
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs),
        }
    }
}

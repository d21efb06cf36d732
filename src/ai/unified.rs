use crate::ai::types::LlmProvider;
use crate::ai::{EdenAiProvider, GeminiProvider, PerplexityProvider};
use crate::config::Config;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    Perplexity,
    EdenAi,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::Gemini,
        ProviderKind::Perplexity,
        ProviderKind::EdenAi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::Perplexity => "perplexity",
            ProviderKind::EdenAi => "edenai",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "perplexity" => Ok(ProviderKind::Perplexity),
            "edenai" | "eden" | "eden-ai" => Ok(ProviderKind::EdenAi),
            other => Err(format!("unknown provider: {other}")),
        }
    }
}

/// Provider handles built once at startup. The set is read-only afterwards.
#[derive(Clone)]
pub struct ProviderSet {
    pub gemini: Arc<dyn LlmProvider>,
    pub perplexity: Arc<dyn LlmProvider>,
    pub edenai: Arc<dyn LlmProvider>,
}

impl ProviderSet {
    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self {
            gemini: Arc::new(GeminiProvider::new(client.clone(), &config.gemini)),
            perplexity: Arc::new(PerplexityProvider::new(client.clone(), &config.perplexity)),
            edenai: Arc::new(EdenAiProvider::new(client, &config.edenai)),
        }
    }

    /// Uses the same provider for every kind; handy when wiring fakes.
    pub fn uniform(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            gemini: provider.clone(),
            perplexity: provider.clone(),
            edenai: provider,
        }
    }

    pub fn get(&self, kind: ProviderKind) -> Arc<dyn LlmProvider> {
        match kind {
            ProviderKind::Gemini => self.gemini.clone(),
            ProviderKind::Perplexity => self.perplexity.clone(),
            ProviderKind::EdenAi => self.edenai.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_names() {
        assert_eq!("Gemini".parse::<ProviderKind>(), Ok(ProviderKind::Gemini));
        assert_eq!(" edenai ".parse::<ProviderKind>(), Ok(ProviderKind::EdenAi));
        assert!("openrouter".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.to_string().parse::<ProviderKind>(), Ok(kind));
        }
    }
}

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use log::{info, warn};
use tokio::net::TcpListener;

use farmwater::ai::{build_llm_http_client, ProviderKind};
use farmwater::config::Config;
use farmwater::{build_state, http, storage};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // .env is optional; the process environment still applies
    let env_loaded = dotenv::dotenv().is_ok();

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("farmwater", log::LevelFilter::Info)
        .filter_module("sqlx", log::LevelFilter::Error)
        .filter_module("sea_orm", log::LevelFilter::Warn)
        .parse_env("RUST_LOG")
        .init();

    if !env_loaded {
        info!("no .env file found, reading configuration from the environment");
    }

    let config = Config::from_env();
    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .with_context(|| format!("invalid BIND_ADDR {}", config.bind_addr))?;

    for kind in ProviderKind::ALL {
        let key = match kind {
            ProviderKind::Gemini => &config.gemini.api_key,
            ProviderKind::Perplexity => &config.perplexity.api_key,
            ProviderKind::EdenAi => &config.edenai.api_key,
        };
        if key.is_none() {
            warn!("{} API key not set; its chat answers will come from the knowledge base", kind);
        }
    }
    if config.openweather_api_key.is_none() {
        warn!("OPENWEATHER_API_KEY not set; dashboard forecasts will be empty");
    }

    let db = storage::establish_connection(&config.database_url)
        .await
        .with_context(|| format!("failed to connect to {}", config.database_url))?;
    let client = build_llm_http_client(config.llm_proxy.as_deref(), config.llm_timeout)
        .context("failed to build HTTP client")?;

    let state = build_state(&config, Arc::new(db), client);
    let router = http::create_router(state);

    let listener = TcpListener::bind(addr).await?;
    info!(
        "HTTP server listening on {} (chat provider: {})",
        addr, config.chat_provider
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}

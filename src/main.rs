use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hltv_proxy::api::HltvClient;
use hltv_proxy::cache::ResponseCache;
use hltv_proxy::config::Config;
use hltv_proxy::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hltv_proxy=info,tower_http=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting hltv-proxy");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded (cache ttl {:?}, capacity {}, coalescing {})",
        config.cache_ttl, config.cache_capacity, config.coalesce_fetches
    );

    let fetcher = Arc::new(HltvClient::new(&config.hltv_base_url, config.fetch_timeout)?);
    let cache = Arc::new(ResponseCache::new(config.cache_ttl, config.cache_capacity));

    let state = AppState::new(cache, fetcher).with_coalescing(config.coalesce_fetches);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    server::serve(addr, state).await?;

    info!("Shutting down hltv-proxy");
    Ok(())
}

pub mod error;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api::MatchFetcher;
use crate::cache::inflight::SharedFetchResult;
use crate::cache::{InFlightFetches, ResponseCache};
use crate::models::MatchId;

pub use error::ApiError;

/// State shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ResponseCache>,
    pub fetcher: Arc<dyn MatchFetcher>,
    /// Present when concurrent misses should share one upstream fetch
    pub inflight: Option<Arc<InFlightFetches>>,
}

impl AppState {
    pub fn new(cache: Arc<ResponseCache>, fetcher: Arc<dyn MatchFetcher>) -> Self {
        Self {
            cache,
            fetcher,
            inflight: None,
        }
    }

    pub fn with_coalescing(mut self, enabled: bool) -> Self {
        self.inflight = enabled.then(|| Arc::new(InFlightFetches::new()));
        self
    }

    /// Fetch a match from upstream, through the in-flight registry if enabled
    pub async fn fetch(&self, id: MatchId) -> SharedFetchResult {
        match &self.inflight {
            Some(inflight) => inflight.fetch(id, Arc::clone(&self.fetcher)).await,
            None => self.fetcher.fetch_match(id).await.map_err(Arc::new),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/hltv/:id", get(handlers::match_summary))
        .layer(CorsLayer::new().allow_origin(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl-C
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HLTV proxy listening on {}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => {
                    warn!("Cannot listen for shutdown signal: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        })
        .await
        .context("HTTP server error")
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use tracing::{debug, info, warn};

use super::parser::parse_match_page;
use super::{FetchError, MatchFetcher};
use crate::models::{MatchId, MatchRecord};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Markers found in Cloudflare interstitial pages
const CHALLENGE_MARKERS: &[&str] = &[
    "cf-chl",
    "challenge-platform",
    "Just a moment...",
    "Attention Required! | Cloudflare",
];

/// Client for HLTV match pages
pub struct HltvClient {
    client: Client,
    base_url: String,
}

impl HltvClient {
    /// Create a new client against `base_url` (e.g. "https://www.hltv.org")
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Match page URL for `id`
    pub fn match_url(&self, id: MatchId) -> String {
        format!("{}/matches/{}/", self.base_url, id)
    }

    /// Download the raw match page HTML
    pub async fn fetch_html(&self, id: MatchId) -> Result<String, FetchError> {
        let url = self.match_url(id);

        info!("Fetching HLTV match page {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml")
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        check_response(&url, status, &body)?;

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

#[async_trait]
impl MatchFetcher for HltvClient {
    async fn fetch_match(&self, id: MatchId) -> Result<MatchRecord, FetchError> {
        let html = self.fetch_html(id).await?;
        parse_match_page(&html)
    }
}

/// Classify an upstream response before parsing
fn check_response(url: &str, status: StatusCode, body: &str) -> Result<(), FetchError> {
    if looks_like_challenge(body) {
        warn!("HLTV served an anti-bot challenge for {} ({})", url, status);
        return Err(FetchError::Challenge {
            url: url.to_string(),
            status,
        });
    }

    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    Ok(())
}

/// A real match page always carries the teams box, a challenge page never does
fn looks_like_challenge(body: &str) -> bool {
    !body.contains("teamsBox") && CHALLENGE_MARKERS.iter().any(|m| body.contains(m))
}

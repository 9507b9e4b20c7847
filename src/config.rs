use std::env;
use std::num::NonZeroUsize;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server listens on
    pub port: u16,

    /// HLTV origin, without trailing slash
    pub hltv_base_url: String,

    /// How long a computed payload is served from cache
    pub cache_ttl: Duration,

    /// Maximum number of matches kept in cache
    pub cache_capacity: NonZeroUsize,

    /// Upstream request timeout
    pub fetch_timeout: Duration,

    /// Share one upstream fetch between concurrent misses
    pub coalesce_fetches: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let cache_capacity: usize = var("CACHE_CAPACITY", "1024")
            .parse()
            .context("CACHE_CAPACITY must be a valid number")?;

        Ok(Config {
            port: var("PORT", "8080")
                .parse()
                .context("PORT must be a valid port number")?,

            hltv_base_url: var("HLTV_BASE_URL", "https://www.hltv.org")
                .trim_end_matches('/')
                .to_string(),

            cache_ttl: Duration::from_millis(
                var("CACHE_TTL_MS", "10000")
                    .parse()
                    .context("CACHE_TTL_MS must be a valid number")?,
            ),

            cache_capacity: NonZeroUsize::new(cache_capacity)
                .context("CACHE_CAPACITY must be greater than zero")?,

            fetch_timeout: Duration::from_secs(
                var("FETCH_TIMEOUT_SECS", "15")
                    .parse()
                    .context("FETCH_TIMEOUT_SECS must be a valid number")?,
            ),

            coalesce_fetches: var("COALESCE_FETCHES", "false")
                .parse()
                .context("COALESCE_FETCHES must be true or false")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.hltv_base_url, "https://www.hltv.org");
        assert_eq!(config.cache_ttl, Duration::from_millis(10_000));
        assert_eq!(config.cache_capacity.get(), 1024);
        assert_eq!(config.fetch_timeout, Duration::from_secs(15));
        assert!(!config.coalesce_fetches);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "3000"),
            ("HLTV_BASE_URL", "http://localhost:9000/"),
            ("CACHE_TTL_MS", "2500"),
            ("COALESCE_FETCHES", "true"),
        ])
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.hltv_base_url, "http://localhost:9000");
        assert_eq!(config.cache_ttl, Duration::from_millis(2500));
        assert!(config.coalesce_fetches);
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("PORT", "70000")]).is_err());
        assert!(load(&[("CACHE_CAPACITY", "0")]).is_err());
        assert!(load(&[("COALESCE_FETCHES", "yes")]).is_err());
    }
}

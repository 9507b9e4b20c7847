use std::env;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hltv_proxy::api::parser::parse_match_page;
use hltv_proxy::api::HltvClient;
use hltv_proxy::config::Config;
use hltv_proxy::models::{MatchId, MatchRecord};
use hltv_proxy::projector::project;

const USAGE: &str = "usage: fetch_match <match-id> [--raw] | fetch_match --file <page.html> [--raw]";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fetch_match=info,hltv_proxy=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse arguments
    let args: Vec<String> = env::args().skip(1).collect();
    let raw = args.iter().any(|a| a == "--raw");

    let record = match find_flag_value(&args, "--file") {
        Some(path) => {
            info!("Parsing saved match page {}", path);
            let html = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path))?;
            parse_match_page(&html)?
        }
        None => fetch(&args).await?,
    };

    // Print either the scraped record or the served payload
    let output = if raw {
        serde_json::to_string_pretty(&record)?
    } else {
        serde_json::to_string_pretty(&project(&record))?
    };
    println!("{}", output);

    Ok(())
}

async fn fetch(args: &[String]) -> Result<MatchRecord> {
    let Some(raw_id) = args.iter().find(|a| !a.starts_with("--")) else {
        bail!(USAGE);
    };
    let id: MatchId = raw_id.parse()?;

    let config = Config::from_env()?;
    let client = HltvClient::new(&config.hltv_base_url, config.fetch_timeout)?;

    let html = client.fetch_html(id).await?;
    info!("Fetched {} bytes for match {}", html.len(), id);

    Ok(parse_match_page(&html)?)
}

/// Value following `flag`, if any
fn find_flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

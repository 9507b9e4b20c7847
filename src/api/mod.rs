pub mod error;
pub mod hltv;
pub mod parser;

use async_trait::async_trait;

use crate::models::{MatchId, MatchRecord};

pub use error::FetchError;
pub use hltv::HltvClient;

/// Source of match records
#[async_trait]
pub trait MatchFetcher: Send + Sync {
    async fn fetch_match(&self, id: MatchId) -> Result<MatchRecord, FetchError>;
}

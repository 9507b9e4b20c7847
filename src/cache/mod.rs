pub mod inflight;
pub mod response_cache;

pub use inflight::InFlightFetches;
pub use response_cache::{CacheEntry, ResponseCache};

pub mod match_record;
pub mod payload;

pub use match_record::{MapRecord, MatchId, MatchRecord, TeamRef};
pub use payload::{ResultPayload, RoundScore, SeriesScore, TeamNames};

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// HLTV match identifier, always a positive integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchId(NonZeroU64);

/// Rejected match identifier input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid match id: {0:?}")]
pub struct InvalidMatchId(pub String);

impl MatchId {
    pub fn new(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl FromStr for MatchId {
    type Err = InvalidMatchId;

    /// Accepts decimal digits only: no sign, no fraction, no zero
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidMatchId(s.to_string()));
        }

        s.parse::<u64>()
            .ok()
            .and_then(MatchId::new)
            .ok_or_else(|| InvalidMatchId(s.to_string()))
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Match page data as scraped from HLTV
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchRecord {
    /// Left-hand team
    pub team1: Option<TeamRef>,

    /// Right-hand team
    pub team2: Option<TeamRef>,

    /// Maps in veto order
    pub maps: Vec<MapRecord>,

    /// Whether the match as a whole is in progress
    #[serde(alias = "live")]
    pub is_live: bool,
}

/// Team identity as it appears on the match page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamRef {
    /// HLTV team ID (if known)
    pub id: Option<i64>,

    /// Display name
    pub name: Option<String>,
}

impl TeamRef {
    /// Both references carry a known ID and it is the same one
    pub fn same_team(&self, other: &TeamRef) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

/// Single map of a series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapRecord {
    /// Map name (e.g. "Mirage")
    pub name: Option<String>,

    /// Team that won the map, once decided
    pub winner_team: Option<TeamRef>,

    /// Status tag ("played", "live", ...)
    pub status: Option<String>,

    /// Live marker independent of the status tag
    pub live: bool,

    /// Rounds won by team1
    pub team1_score: Option<i64>,

    /// Rounds won by team2
    pub team2_score: Option<i64>,

    /// Alternative score shape reported for maps without a round pair
    pub current_score: Option<serde_json::Value>,
}

impl MapRecord {
    /// Map is being played right now, by status tag or flag
    pub fn is_live(&self) -> bool {
        self.live || self.status.as_deref() == Some("live")
    }

    /// Map has a recorded winner
    pub fn is_decided(&self) -> bool {
        self.winner_team.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_id_parse() {
        assert_eq!("2370931".parse::<MatchId>().map(MatchId::get), Ok(2370931));
        assert!("0".parse::<MatchId>().is_err());
        assert!("-5".parse::<MatchId>().is_err());
        assert!("+5".parse::<MatchId>().is_err());
        assert!("1.5".parse::<MatchId>().is_err());
        assert!("abc".parse::<MatchId>().is_err());
        assert!("".parse::<MatchId>().is_err());
        assert!("99999999999999999999999".parse::<MatchId>().is_err());
    }

    #[test]
    fn test_record_deserialize_defaults() {
        let record: MatchRecord = serde_json::from_value(serde_json::json!({
            "team1": { "id": 1, "name": "A" },
            "live": true
        }))
        .unwrap();

        assert!(record.is_live);
        assert!(record.maps.is_empty());
        assert!(record.team2.is_none());
        assert_eq!(record.team1.unwrap().name.as_deref(), Some("A"));
    }

    #[test]
    fn test_map_liveness() {
        let tagged = MapRecord {
            status: Some("live".to_string()),
            ..Default::default()
        };
        let flagged = MapRecord {
            live: true,
            ..Default::default()
        };
        let played = MapRecord {
            status: Some("played".to_string()),
            ..Default::default()
        };

        assert!(tagged.is_live());
        assert!(flagged.is_live());
        assert!(!played.is_live());
    }

    #[test]
    fn test_same_team_needs_known_ids() {
        let a = TeamRef { id: Some(1), name: None };
        let unknown = TeamRef::default();

        assert!(a.same_team(&a.clone()));
        assert!(!a.same_team(&unknown));
        assert!(!unknown.same_team(&TeamRef::default()));
    }
}

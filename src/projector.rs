use crate::models::{MapRecord, MatchRecord, ResultPayload, RoundScore, SeriesScore, TeamNames};

/// Score carried by a live map, resolved from the two upstream shapes
#[derive(Debug, Clone, PartialEq)]
pub enum LiveScore {
    /// Both round counters present
    NumericPair(i64, i64),
    /// Alternative score structure, kept as-is
    Opaque(serde_json::Value),
    None,
}

impl LiveScore {
    /// Round pair wins over the alternative structure
    pub fn resolve(map: &MapRecord) -> Self {
        match (map.team1_score, map.team2_score, &map.current_score) {
            (Some(left), Some(right), _) => LiveScore::NumericPair(left, right),
            (_, _, Some(score)) if !score.is_null() => LiveScore::Opaque(score.clone()),
            _ => LiveScore::None,
        }
    }

    pub fn into_rounds(self) -> Option<RoundScore> {
        match self {
            LiveScore::NumericPair(left, right) => Some(RoundScore::Pair { left, right }),
            LiveScore::Opaque(value) => Some(RoundScore::Opaque(value)),
            LiveScore::None => None,
        }
    }
}

/// Project a scraped match into the payload served to clients
pub fn project(record: &MatchRecord) -> ResultPayload {
    ResultPayload {
        teams: TeamNames {
            left: record.team1.as_ref().and_then(|t| t.name.clone()),
            right: record.team2.as_ref().and_then(|t| t.name.clone()),
        },
        series: series_score(record),
        rounds: live_map(record).and_then(|map| LiveScore::resolve(map).into_rounds()),
        maps_played: maps_played(record),
        live: record.is_live,
    }
}

/// Count decided maps per side. A winner matching neither team is ignored.
pub fn series_score(record: &MatchRecord) -> SeriesScore {
    let mut score = SeriesScore::default();

    for winner in record.maps.iter().filter_map(|m| m.winner_team.as_ref()) {
        if record.team1.as_ref().is_some_and(|t| t.same_team(winner)) {
            score.left += 1;
        } else if record.team2.as_ref().is_some_and(|t| t.same_team(winner)) {
            score.right += 1;
        }
    }

    score
}

/// First map in veto order that is live
pub fn live_map(record: &MatchRecord) -> Option<&MapRecord> {
    record.maps.iter().find(|m| m.is_live())
}

/// Decided or live maps, never less than 1
pub fn maps_played(record: &MatchRecord) -> u32 {
    let count = record
        .maps
        .iter()
        .filter(|m| m.is_decided() || m.is_live())
        .count();

    u32::try_from(count).unwrap_or(u32::MAX).max(1)
}

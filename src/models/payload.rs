use serde::{Deserialize, Serialize};

/// Compact match summary served by the proxy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPayload {
    pub teams: TeamNames,
    pub series: SeriesScore,
    /// Round score of the live map, `null` when no map is live
    pub rounds: Option<RoundScore>,
    pub maps_played: u32,
    pub live: bool,
}

/// Display names, left = team1, right = team2
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamNames {
    pub left: Option<String>,
    pub right: Option<String>,
}

/// Maps won by each side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesScore {
    pub left: u32,
    pub right: u32,
}

/// Live round score as reported upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoundScore {
    Pair { left: i64, right: i64 },
    /// Passed through verbatim
    Opaque(serde_json::Value),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_shape() {
        let payload = ResultPayload {
            teams: TeamNames {
                left: Some("A".to_string()),
                right: None,
            },
            series: SeriesScore { left: 1, right: 0 },
            rounds: None,
            maps_played: 1,
            live: false,
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "teams": { "left": "A", "right": null },
                "series": { "left": 1, "right": 0 },
                "rounds": null,
                "mapsPlayed": 1,
                "live": false
            })
        );
    }

    #[test]
    fn test_round_score_serialization() {
        let pair = RoundScore::Pair { left: 7, right: 5 };
        let opaque = RoundScore::Opaque(json!("(4:8; 3:0)"));

        assert_eq!(serde_json::to_value(pair).unwrap(), json!({ "left": 7, "right": 5 }));
        assert_eq!(serde_json::to_value(opaque).unwrap(), json!("(4:8; 3:0)"));
    }
}

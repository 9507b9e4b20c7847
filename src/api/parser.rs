//! HLTV match page scraping.
//!
//! Only the parts of the page needed for the score summary are read: the two
//! team headers, the countdown (which reads "LIVE" while the match is on) and
//! the map holders with their per-map results.

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::debug;

use super::FetchError;
use crate::models::{MapRecord, MatchRecord, TeamRef};

/// Parse a full match page into a record
pub fn parse_match_page(html: &str) -> Result<MatchRecord, FetchError> {
    let document = Html::parse_document(html);

    let teams_box = document
        .select(&selector("div.teamsBox")?)
        .next()
        .ok_or_else(|| FetchError::Parse("teams box (div.teamsBox) not found".to_string()))?;

    let team1 = parse_team(&teams_box, "div.team1-gradient")?;
    let team2 = parse_team(&teams_box, "div.team2-gradient")?;

    let is_live = document
        .select(&selector("div.countdown")?)
        .next()
        .is_some_and(|e| element_text(&e).eq_ignore_ascii_case("live"));

    let maps = parse_maps(&document, team1.as_ref(), team2.as_ref(), is_live)?;

    debug!(
        "Parsed match page: {:?} vs {:?}, {} maps, live={}",
        team1.as_ref().and_then(|t| t.name.as_deref()),
        team2.as_ref().and_then(|t| t.name.as_deref()),
        maps.len(),
        is_live
    );

    Ok(MatchRecord {
        team1,
        team2,
        maps,
        is_live,
    })
}

fn parse_team(teams_box: &ElementRef, css: &str) -> Result<Option<TeamRef>, FetchError> {
    let Some(block) = teams_box.select(&selector(css)?).next() else {
        return Ok(None);
    };

    let name = block
        .select(&selector("div.teamName")?)
        .next()
        .map(|e| element_text(&e))
        .filter(|n| !n.is_empty());

    let id = block
        .select(&selector("a[href]")?)
        .filter_map(|a| a.value().attr("href"))
        .find_map(team_id_from_href);

    Ok(Some(TeamRef { id, name }))
}

fn parse_maps(
    document: &Html,
    team1: Option<&TeamRef>,
    team2: Option<&TeamRef>,
    match_live: bool,
) -> Result<Vec<MapRecord>, FetchError> {
    let name_sel = selector("div.mapname")?;
    let left_score_sel = selector("div.results-left div.results-team-score")?;
    let right_score_sel = selector("div.results-right div.results-team-score")?;
    let left_won_sel = selector("div.results-left.won")?;
    let right_won_sel = selector("div.results-right.won")?;
    let half_score_sel = selector("div.results-center-half-score")?;
    let live_sel = selector(".live")?;

    let mut seen_live = false;
    let mut maps = Vec::new();

    for holder in document.select(&selector("div.mapholder")?) {
        let name = holder
            .select(&name_sel)
            .next()
            .map(|e| element_text(&e))
            .filter(|n| !n.is_empty());

        let team1_score = holder.select(&left_score_sel).next().and_then(|e| parse_score(&e));
        let team2_score = holder.select(&right_score_sel).next().and_then(|e| parse_score(&e));

        let winner_team = if holder.select(&left_won_sel).next().is_some() {
            Some(team1.cloned().unwrap_or_default())
        } else if holder.select(&right_won_sel).next().is_some() {
            Some(team2.cloned().unwrap_or_default())
        } else {
            None
        };

        let current_score = holder
            .select(&half_score_sel)
            .next()
            .map(|e| element_text(&e))
            .filter(|s| !s.is_empty())
            .map(Value::String);

        let live = holder.select(&live_sel).next().is_some();

        let status = if winner_team.is_some() {
            Some("played".to_string())
        } else if live
            || (match_live && !seen_live && team1_score.is_some() && team2_score.is_some())
        {
            seen_live = true;
            Some("live".to_string())
        } else {
            None
        };

        maps.push(MapRecord {
            name,
            winner_team,
            status,
            live,
            team1_score,
            team2_score,
            current_score,
        });
    }

    Ok(maps)
}

fn selector(css: &str) -> Result<Selector, FetchError> {
    Selector::parse(css).map_err(|e| FetchError::Parse(format!("invalid selector {css:?}: {e}")))
}

/// Concatenated text with whitespace collapsed
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Round counter; "-" and other placeholders mean no score yet
fn parse_score(element: &ElementRef) -> Option<i64> {
    element_text(element).parse().ok()
}

/// Extract the numeric ID from links like "/team/9565/vitality"
fn team_id_from_href(href: &str) -> Option<i64> {
    let (_, rest) = href.split_once("/team/")?;
    rest.split('/').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIVE_PAGE: &str = r#"
<html><body>
<div class="teamsBox">
  <div class="team">
    <div class="team1-gradient">
      <a href="/team/9565/vitality"><img alt="Vitality"><div class="teamName">Vitality</div></a>
      <div class="won">1</div>
    </div>
  </div>
  <div class="timeAndEvent">
    <div class="countdown">LIVE</div>
  </div>
  <div class="team">
    <div class="team2-gradient">
      <a href="https://www.hltv.org/team/4608/natus-vincere"><div class="teamName"> Natus
        Vincere </div></a>
    </div>
  </div>
</div>
<div class="flexbox-column">
  <div class="mapholder">
    <div class="played"><div class="mapname">Mirage</div></div>
    <div class="results played">
      <div class="results-left won"><div class="results-team-score">13</div></div>
      <span class="results-center"><div class="results-center-half-score">(7:5; 6:4)</div></span>
      <div class="results-right lost"><div class="results-team-score">9</div></div>
    </div>
  </div>
  <div class="mapholder">
    <div class="played"><div class="mapname">Inferno</div></div>
    <div class="results">
      <div class="results-left"><div class="results-team-score">7</div></div>
      <span class="results-center"><div class="results-center-half-score">(7:5)</div></span>
      <div class="results-right"><div class="results-team-score">5</div></div>
    </div>
  </div>
  <div class="mapholder">
    <div class="optional"><div class="mapname">Nuke</div></div>
    <div class="results">
      <div class="results-left"><div class="results-team-score">-</div></div>
      <div class="results-right"><div class="results-team-score">-</div></div>
    </div>
  </div>
</div>
</body></html>
"#;

    #[test]
    fn test_parse_live_page() {
        let record = parse_match_page(LIVE_PAGE).unwrap();

        let team1 = record.team1.clone().unwrap();
        let team2 = record.team2.clone().unwrap();
        assert_eq!(team1.id, Some(9565));
        assert_eq!(team1.name.as_deref(), Some("Vitality"));
        assert_eq!(team2.id, Some(4608));
        assert_eq!(team2.name.as_deref(), Some("Natus Vincere"));
        assert!(record.is_live);

        assert_eq!(record.maps.len(), 3);

        let mirage = &record.maps[0];
        assert_eq!(mirage.name.as_deref(), Some("Mirage"));
        assert_eq!(mirage.winner_team.as_ref(), Some(&team1));
        assert_eq!(mirage.status.as_deref(), Some("played"));
        assert_eq!((mirage.team1_score, mirage.team2_score), (Some(13), Some(9)));

        let inferno = &record.maps[1];
        assert!(inferno.winner_team.is_none());
        assert_eq!(inferno.status.as_deref(), Some("live"));
        assert_eq!((inferno.team1_score, inferno.team2_score), (Some(7), Some(5)));
        assert_eq!(inferno.current_score, Some(Value::String("(7:5)".to_string())));

        let nuke = &record.maps[2];
        assert_eq!(nuke.status, None);
        assert_eq!((nuke.team1_score, nuke.team2_score), (None, None));
        assert!(!nuke.is_live());
    }

    #[test]
    fn test_projected_live_page() {
        let payload = crate::projector::project(&parse_match_page(LIVE_PAGE).unwrap());

        assert_eq!(payload.series.left, 1);
        assert_eq!(payload.series.right, 0);
        assert_eq!(
            payload.rounds,
            Some(crate::models::RoundScore::Pair { left: 7, right: 5 })
        );
        assert_eq!(payload.maps_played, 2);
    }

    #[test]
    fn test_finished_page_has_no_live_map() {
        let page = LIVE_PAGE.replace(">LIVE<", ">Match over<");
        let record = parse_match_page(&page).unwrap();

        assert!(!record.is_live);
        assert_eq!(record.maps[1].status, None);
        assert!(record.maps.iter().all(|m| !m.is_live()));
    }

    #[test]
    fn test_non_match_page_is_parse_error() {
        let err = parse_match_page("<html><body><h1>Not found</h1></body></html>").unwrap_err();

        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn test_team_id_from_href() {
        assert_eq!(team_id_from_href("/team/9565/vitality"), Some(9565));
        assert_eq!(team_id_from_href("https://www.hltv.org/team/4608/natus-vincere"), Some(4608));
        assert_eq!(team_id_from_href("/player/7998/s1mple"), None);
        assert_eq!(team_id_from_href("/team/abc/x"), None);
    }
}

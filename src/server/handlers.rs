use std::time::Instant;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use tracing::{debug, error};

use super::{ApiError, AppState};
use crate::models::{MatchId, ResultPayload};
use crate::projector::project;

/// Liveness probe
pub async fn health() -> &'static str {
    "ok"
}

/// Score summary for one match, served from cache while fresh
pub async fn match_summary(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Json<ResultPayload>, ApiError> {
    // Segments that do not even decode to UTF-8 are bad ids too
    let Path(raw_id) = raw_id.map_err(|_| ApiError::BadId)?;
    let id: MatchId = raw_id.parse().map_err(|_| ApiError::BadId)?;
    let now = Instant::now();

    if let Some(payload) = state.cache.get(id, now).await {
        return Ok(Json(payload));
    }

    let record = state.fetch(id).await.map_err(|e| {
        error!("HLTV proxy error for match {} ({}): {}", id, e.kind(), e);
        ApiError::FetchFailed {
            detail: e.to_string(),
        }
    })?;

    let payload = project(&record);
    debug!(
        "Match {}: series {}-{}, map {}, live={}",
        id, payload.series.left, payload.series.right, payload.maps_played, payload.live
    );

    state.cache.put(id, payload.clone(), now).await;

    Ok(Json(payload))
}

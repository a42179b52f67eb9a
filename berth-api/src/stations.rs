use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use berth_core::Station;
use berth_search::search_stations;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StationQuery {
    #[serde(default)]
    q: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/stations", get(list_stations))
}

async fn list_stations(
    State(state): State<AppState>,
    Query(query): Query<StationQuery>,
) -> Result<Json<Vec<Station>>, AppError> {
    let stations = state.catalog.list_stations().await?;
    Ok(Json(search_stations(&stations, &query.q)))
}

/// Resolve an optional station code against the catalog. Blank means unset.
pub(crate) async fn resolve(state: &AppState, code: Option<&str>) -> Result<Option<Station>, AppError> {
    let code = match code.map(str::trim) {
        Some(c) if !c.is_empty() => c,
        _ => return Ok(None),
    };
    state
        .catalog
        .find_station(code)
        .await?
        .map(Some)
        .ok_or_else(|| AppError::NotFound(format!("Station {} not found", code)))
}

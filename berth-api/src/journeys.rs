use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use berth_order::{list_journeys, DateOrder, Journey, StatusFilter};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct JourneyQuery {
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub order: DateOrder,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/journeys", get(get_journeys))
        .route("/v1/journeys/{pnr}", get(get_journey))
}

async fn get_journeys(
    State(state): State<AppState>,
    Query(query): Query<JourneyQuery>,
) -> Result<Json<Vec<Journey>>, AppError> {
    let journeys = state.journeys.list().await?;
    Ok(Json(list_journeys(&journeys, query.status, query.order)))
}

async fn get_journey(
    State(state): State<AppState>,
    Path(pnr): Path<String>,
) -> Result<Json<Journey>, AppError> {
    state
        .journeys
        .find_by_pnr(&pnr)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No journey with PNR {}", pnr)))
}

use axum::{extract::State, routing::post, Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use berth_catalog::Train;
use berth_core::{ClassFilter, ClassType, SearchCriteria};
use berth_search::filter::standard_window;
use berth_search::{ListingState, SortKey, TrainQuery};
use berth_shared::models::events::{DomainEvent, TrainSearchEvent};
use crate::error::AppError;
use crate::extract::AppJson;
use crate::stations::resolve;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub travel_date: Option<NaiveDate>,
    #[serde(default)]
    pub class_filter: ClassFilter,
    /// Move the travel date by this many days before searching.
    #[serde(default)]
    pub shift_days: i64,
    #[serde(default)]
    pub class_types: BTreeSet<ClassType>,
    /// Ids of the standard departure windows, e.g. `"morning"`.
    #[serde(default)]
    pub time_windows: Vec<String>,
    #[serde(default)]
    pub sort: SortKey,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub criteria: SearchCriteria,
    pub listing: ListingState,
    pub filtered: bool,
    pub total: usize,
    pub trains: Vec<Train>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/trains/search", post(search_trains))
}

async fn search_trains(
    State(state): State<AppState>,
    AppJson(req): AppJson<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let mut criteria = SearchCriteria {
        origin: resolve(&state, req.origin.as_deref()).await?,
        destination: resolve(&state, req.destination.as_deref()).await?,
        travel_date: req.travel_date,
        class_filter: req.class_filter,
    };
    if req.shift_days != 0 {
        criteria.shift_date(req.shift_days);
    }

    let mut listing = ListingState::default();
    for class_type in req.class_types {
        listing.toggle_class(class_type);
    }
    for id in &req.time_windows {
        let window = standard_window(id)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown time window: {}", id)))?;
        listing.toggle_window(window);
    }
    listing.set_sort(req.sort);

    let trains = TrainQuery::new(state.catalog.clone()).search(&criteria).await?;
    let total = trains.len();
    let trains = listing.apply(&trains);

    if let (Some(origin), Some(destination), Some(date)) =
        (&criteria.origin, &criteria.destination, criteria.travel_date)
    {
        state.events.publish(DomainEvent::TrainSearch(TrainSearchEvent {
            origin: origin.code.clone(),
            destination: destination.code.clone(),
            travel_date: date.to_string(),
            result_count: trains.len(),
            timestamp: chrono::Utc::now().timestamp(),
        }));
    }

    Ok(Json(SearchResponse {
        criteria,
        filtered: listing.is_filtered(),
        listing,
        total,
        trains,
    }))
}

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use berth_order::{PassengerStatus, WaitingTicket};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct WaitlistQuery {
    #[serde(default)]
    pub pnr: String,
}

#[derive(Debug, Serialize)]
pub struct StatusView {
    #[serde(flatten)]
    pub status: PassengerStatus,
    pub tone: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TicketView {
    #[serde(flatten)]
    pub ticket: WaitingTicket,
    pub passenger_statuses: Vec<StatusView>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/waitlist", get(check_status))
}

async fn check_status(
    State(state): State<AppState>,
    Query(query): Query<WaitlistQuery>,
) -> Result<Json<Vec<TicketView>>, AppError> {
    let tickets = state.waitlist.lookup(&query.pnr).await?;
    tracing::debug!(pnr = %query.pnr, matches = tickets.len(), "Waitlist lookup");

    Ok(Json(
        tickets
            .into_iter()
            .map(|ticket| TicketView {
                passenger_statuses: ticket
                    .passengers
                    .iter()
                    .map(|p| {
                        let status = p.status();
                        StatusView { tone: status.tone(), status }
                    })
                    .collect(),
                ticket,
            })
            .collect(),
    ))
}

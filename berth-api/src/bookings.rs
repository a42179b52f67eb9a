use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use berth_catalog::{BerthType, ClassType, FareBreakdown, Seat, SeatFilter, SeatState};
use berth_order::{BookingAction, BookingDetails, BookingError, CheckoutFlow, CheckoutStage};
use berth_shared::models::events::{DomainEvent, SeatSelectionEvent};
use crate::error::AppError;
use crate::extract::AppJson;
use crate::stations::resolve;
use crate::state::{AppState, Session};

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub booking: BookingDetails,
    pub checkout: CheckoutStage,
}

impl SessionView {
    fn of(id: Uuid, session: &Session) -> Self {
        Self {
            id,
            booking: session.booking.details().clone(),
            checkout: session.checkout.stage().clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SelectTrainRequest {
    pub origin: String,
    pub destination: String,
    pub travel_date: NaiveDate,
    pub train_number: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectClassRequest {
    pub class_type: ClassType,
}

/// Comma-separated berth types, e.g. `berth_types=lower,side-lower`.
#[derive(Debug, Default, Deserialize)]
pub struct SeatQuery {
    pub berth_types: Option<String>,
    pub only_available: Option<bool>,
    pub only_ladies: Option<bool>,
}

impl SeatQuery {
    fn to_filter(&self) -> Result<SeatFilter, AppError> {
        let mut filter = SeatFilter::default();
        if let Some(raw) = &self.berth_types {
            for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                let berth: BerthType = serde_json::from_value(serde_json::Value::String(part.to_string()))
                    .map_err(|_| AppError::BadRequest(format!("Unknown berth type: {}", part)))?;
                filter.berth_types.insert(berth);
            }
        }
        if let Some(only_available) = self.only_available {
            filter.only_available = only_available;
        }
        if let Some(only_ladies) = self.only_ladies {
            filter.only_ladies = only_ladies;
        }
        Ok(filter)
    }
}

#[derive(Debug, Serialize)]
pub struct SeatView {
    #[serde(flatten)]
    pub seat: Seat,
    pub state: SeatState,
    pub color: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CoachView {
    pub train_number: String,
    pub class_type: ClassType,
    pub seats: Vec<SeatView>,
    pub selected: Vec<String>,
    pub fare: FareBreakdown,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", post(create_session))
        .route("/v1/bookings/{id}", get(get_session).delete(delete_session))
        .route("/v1/bookings/{id}/train", put(select_train))
        .route("/v1/bookings/{id}/class", put(select_class))
        .route("/v1/bookings/{id}/seats", get(list_seats))
        .route(
            "/v1/bookings/{id}/seats/{seat_id}",
            put(select_seat).delete(deselect_seat),
        )
        .route("/v1/bookings/{id}/fare", get(get_fare))
}

async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionView>) {
    let id = Uuid::new_v4();
    let session = state.new_session();
    let view = SessionView::of(id, &session);

    state.sessions.write().await.insert(id, session);
    tracing::info!(session_id = %id, "Booking session opened");

    (StatusCode::CREATED, Json(view))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| AppError::session_not_found(id))?;
    Ok(Json(SessionView::of(id, session)))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get(&id).ok_or_else(|| AppError::session_not_found(id))?;
    session.ensure_idle()?;
    sessions.remove(&id);
    tracing::info!(session_id = %id, "Booking session closed");
    Ok(StatusCode::NO_CONTENT)
}

async fn select_train(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(req): AppJson<SelectTrainRequest>,
) -> Result<Json<SessionView>, AppError> {
    let origin = resolve(&state, Some(req.origin.as_str()))
        .await?
        .ok_or_else(|| AppError::BadRequest("origin is required".to_string()))?;
    let destination = resolve(&state, Some(req.destination.as_str()))
        .await?
        .ok_or_else(|| AppError::BadRequest("destination is required".to_string()))?;

    let train = state
        .catalog
        .find_train(&req.train_number, &origin, &destination, req.travel_date)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Train {} not found", req.train_number)))?;

    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| AppError::session_not_found(id))?;
    apply(session, BookingAction::SelectTrain {
        train,
        departure_date: Some(req.travel_date),
    })?;

    Ok(Json(SessionView::of(id, session)))
}

async fn select_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(req): AppJson<SelectClassRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| AppError::session_not_found(id))?;

    apply(session, BookingAction::SelectClass { class_type: req.class_type })?;

    let details = session.booking.details();
    let coach = match (&details.train, &details.selected_class) {
        (Some(train), Some(class)) => state.layout.generate_layout(train, class),
        _ => Vec::new(),
    };
    session.booking.set_coach(coach);

    Ok(Json(SessionView::of(id, session)))
}

async fn list_seats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SeatQuery>,
) -> Result<Json<CoachView>, AppError> {
    let filter = query.to_filter()?;

    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| AppError::session_not_found(id))?;
    let details = session.booking.details();

    let train = details.train.as_ref().ok_or(BookingError::NoTrainSelected)?;
    let class = details.selected_class.as_ref().ok_or(BookingError::NoClassSelected)?;

    let seats = filter
        .apply(session.booking.coach())
        .into_iter()
        .map(|seat| {
            let seat_state = SeatState::of(seat, details.selected_seats.contains(&seat.id));
            SeatView {
                seat: seat.clone(),
                state: seat_state,
                color: seat_state.color(),
            }
        })
        .collect();

    Ok(Json(CoachView {
        train_number: train.number.clone(),
        class_type: class.class_type,
        seats,
        selected: details.selected_seats.ids(),
        fare: details.fare,
    }))
}

async fn select_seat(
    State(state): State<AppState>,
    Path((id, seat_id)): Path<(Uuid, String)>,
) -> Result<Json<SessionView>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| AppError::session_not_found(id))?;

    let seat = session.booking.coach_seat(&seat_id)?.clone();
    apply(session, BookingAction::SelectSeat { seat })?;
    publish_seat_event(&state, id, session, &seat_id, true);

    Ok(Json(SessionView::of(id, session)))
}

async fn deselect_seat(
    State(state): State<AppState>,
    Path((id, seat_id)): Path<(Uuid, String)>,
) -> Result<Json<SessionView>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| AppError::session_not_found(id))?;

    let was_selected = session.booking.details().selected_seats.contains(&seat_id);
    apply(session, BookingAction::DeselectSeat { seat_id: seat_id.clone() })?;
    if was_selected {
        publish_seat_event(&state, id, session, &seat_id, false);
    }

    Ok(Json(SessionView::of(id, session)))
}

async fn get_fare(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FareBreakdown>, AppError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(|| AppError::session_not_found(id))?;
    Ok(Json(session.booking.fare()))
}

/// Booking edits invalidate any checkout in progress.
fn apply(session: &mut Session, action: BookingAction) -> Result<(), AppError> {
    session.ensure_idle()?;
    session.booking.apply(action)?;
    if !matches!(session.checkout.stage(), CheckoutStage::CollectingPassengers) {
        session.checkout = CheckoutFlow::new();
    }
    Ok(())
}

fn publish_seat_event(state: &AppState, id: Uuid, session: &Session, seat_id: &str, selected: bool) {
    let train_number = session
        .booking
        .details()
        .train
        .as_ref()
        .map(|t| t.number.clone())
        .unwrap_or_default();

    state.events.publish(DomainEvent::SeatSelection(SeatSelectionEvent {
        session_id: id,
        train_number,
        seat_id: seat_id.to_string(),
        selected,
        timestamp: chrono::Utc::now().timestamp(),
    }));
}

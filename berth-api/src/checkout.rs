use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;
use berth_core::payment::PaymentMethod;
use berth_core::Passenger;
use berth_order::{BookingAction, BookingConfirmation, BookingDetails, CheckoutFlow, CheckoutStage, Journey};
use berth_shared::models::events::DomainEvent;
use crate::error::AppError;
use crate::extract::AppJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PassengersRequest {
    pub passengers: Vec<Passenger>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PaymentRequest {
    #[serde(default)]
    pub method: PaymentMethod,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings/{id}/checkout/passengers", post(submit_passengers))
        .route("/v1/bookings/{id}/checkout/back", post(back_to_passengers))
        .route("/v1/bookings/{id}/checkout/payment", post(pay))
}

async fn submit_passengers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(req): AppJson<PassengersRequest>,
) -> Result<Json<CheckoutStage>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| AppError::session_not_found(id))?;
    session.ensure_idle()?;

    session
        .checkout
        .submit_passengers(session.booking.details(), req.passengers.clone())?;
    session
        .booking
        .apply(BookingAction::UpdatePassengers { passengers: req.passengers })?;

    tracing::info!(session_id = %id, stage = session.checkout.stage().name(), "Passengers accepted");
    Ok(Json(session.checkout.stage().clone()))
}

async fn back_to_passengers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CheckoutStage>, AppError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| AppError::session_not_found(id))?;
    session.ensure_idle()?;

    session.checkout.back()?;
    Ok(Json(session.checkout.stage().clone()))
}

async fn pay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(req): AppJson<PaymentRequest>,
) -> Result<Json<BookingConfirmation>, AppError> {
    let (flow, booking) = {
        let mut sessions = state.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| AppError::session_not_found(id))?;
        session.ensure_idle()?;
        session.paying = true;
        (session.checkout.clone(), session.booking.details().clone())
    };

    // Detached so a dropped request still clears `paying`.
    let settle = tokio::spawn(settle_payment(state, id, flow, booking, req.method));
    let confirmation = settle.await.map_err(anyhow::Error::from)??;
    Ok(Json(confirmation))
}

/// Charge without holding the sessions lock, then write the outcome back.
async fn settle_payment(
    state: AppState,
    id: Uuid,
    mut flow: CheckoutFlow,
    booking: BookingDetails,
    method: PaymentMethod,
) -> Result<BookingConfirmation, AppError> {
    let outcome = state.checkout.pay(id, &mut flow, &booking, method).await;

    {
        let mut sessions = state.sessions.write().await;
        match sessions.get_mut(&id) {
            Some(session) => {
                session.paying = false;
                if outcome.is_ok() {
                    session.checkout = flow;
                    session.booking.reset();
                }
            }
            None => tracing::warn!(session_id = %id, "Booking session gone after payment"),
        }
    }

    let confirmation = outcome?;

    // The charge went through; a storage failure must not hide the PNR.
    if let Err(e) = state.journeys.record(Journey::from_confirmation(&confirmation)).await {
        tracing::error!(
            session_id = %id,
            pnr = %confirmation.pnr,
            error = %e,
            "Failed to record journey"
        );
    }
    state.events.publish(DomainEvent::BookingConfirmed(confirmation.to_event()));

    Ok(confirmation)
}

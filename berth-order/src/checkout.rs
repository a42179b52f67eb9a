use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rand::Rng;
use uuid::Uuid;
use berth_catalog::train::hhmm;
use berth_catalog::FareBreakdown;
use berth_core::payment::PaymentMethod;
use berth_core::{ClassType, Passenger};
use berth_shared::models::events::BookingConfirmedEvent;
use crate::booking::BookingDetails;
use crate::validator::validate_for_seats;
use crate::CheckoutError;

/// Receipt for a paid booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub booking_id: Uuid,
    pub pnr: String,
    pub train_number: String,
    pub train_name: String,
    pub class_type: ClassType,
    pub class_name: String,
    pub journey_date: Option<NaiveDate>,
    pub from: String,
    pub to: String,
    #[serde(with = "hhmm")]
    pub departure_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub arrival_time: NaiveTime,
    pub seats: Vec<String>,
    pub passengers: Vec<Passenger>,
    pub fare: FareBreakdown,
    pub payment_method: PaymentMethod,
    pub payment_reference: String,
    pub confirmed_at: DateTime<Utc>,
}

impl BookingConfirmation {
    pub fn to_event(&self) -> BookingConfirmedEvent {
        BookingConfirmedEvent {
            booking_id: self.booking_id,
            pnr: self.pnr.clone(),
            train_number: self.train_number.clone(),
            class_code: self.class_type.code().to_string(),
            seat_count: self.seats.len(),
            total_fare: self.fare.total,
            payment_method: self.payment_method.label().to_string(),
            timestamp: self.confirmed_at.timestamp(),
        }
    }
}

/// 10-digit PNR with a non-zero leading digit.
pub fn generate_pnr<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = rng.gen_range(1..=9u8);
    let rest: String = (0..9).map(|_| char::from(b'0' + rng.gen_range(0..=9u8))).collect();
    format!("{}{}", first, rest)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutStage {
    CollectingPassengers,
    SelectingPayment { passengers: Vec<Passenger>, fare: FareBreakdown },
    Completed { confirmation: BookingConfirmation },
}

impl CheckoutStage {
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutStage::CollectingPassengers => "COLLECTING_PASSENGERS",
            CheckoutStage::SelectingPayment { .. } => "SELECTING_PAYMENT",
            CheckoutStage::Completed { .. } => "COMPLETED",
        }
    }
}

/// Passenger details, then payment, then done. Advancing past the first step
/// requires the passenger list to validate against the selected seats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutFlow {
    stage: CheckoutStage,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self {
            stage: CheckoutStage::CollectingPassengers,
        }
    }

    pub fn stage(&self) -> &CheckoutStage {
        &self.stage
    }

    /// Passengers accepted for payment, once past the first step.
    pub fn passengers(&self) -> Option<&[Passenger]> {
        match &self.stage {
            CheckoutStage::SelectingPayment { passengers, .. } => Some(passengers),
            CheckoutStage::Completed { confirmation } => Some(&confirmation.passengers),
            CheckoutStage::CollectingPassengers => None,
        }
    }

    /// Transition: CollectingPassengers → SelectingPayment
    pub fn submit_passengers(
        &mut self,
        booking: &BookingDetails,
        passengers: Vec<Passenger>,
    ) -> Result<(), CheckoutError> {
        self.expect_stage("COLLECTING_PASSENGERS", "SELECTING_PAYMENT")?;

        if !booking.is_ready_for_checkout() {
            return Err(CheckoutError::IncompleteBooking(
                "select a train, a class and at least one seat first".to_string(),
            ));
        }

        validate_for_seats(&passengers, booking.seat_count()).map_err(CheckoutError::Invalid)?;

        self.stage = CheckoutStage::SelectingPayment {
            passengers,
            fare: booking.fare,
        };
        Ok(())
    }

    /// Transition: SelectingPayment → CollectingPassengers
    pub fn back(&mut self) -> Result<(), CheckoutError> {
        self.expect_stage("SELECTING_PAYMENT", "COLLECTING_PASSENGERS")?;
        self.stage = CheckoutStage::CollectingPassengers;
        Ok(())
    }

    /// Transition: SelectingPayment → Completed
    pub fn complete(&mut self, confirmation: BookingConfirmation) -> Result<(), CheckoutError> {
        self.expect_stage("SELECTING_PAYMENT", "COMPLETED")?;
        self.stage = CheckoutStage::Completed { confirmation };
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.stage, CheckoutStage::Completed { .. })
    }

    fn expect_stage(&self, expected: &str, to: &str) -> Result<(), CheckoutError> {
        if self.stage.name() != expected {
            tracing::warn!(from = self.stage.name(), to, "Rejected checkout transition");
            return Err(CheckoutError::InvalidTransition {
                from: self.stage.name().to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }
}

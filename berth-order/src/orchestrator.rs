use std::sync::Arc;
use uuid::Uuid;
use berth_core::payment::{PaymentGateway, PaymentIntent, PaymentMethod, PaymentStatus};
use berth_core::{CoreError, CoreResult};
use crate::booking::BookingDetails;
use crate::checkout::{generate_pnr, BookingConfirmation, CheckoutFlow, CheckoutStage};
use crate::CheckoutError;

/// Drives the payment step of a checkout through a `PaymentGateway`.
pub struct CheckoutOrchestrator {
    gateway: Arc<dyn PaymentGateway>,
}

impl CheckoutOrchestrator {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    /// Charge the booking total and move the flow to `Completed`.
    /// The flow is left in `SelectingPayment` when the charge fails.
    pub async fn pay(
        &self,
        booking_id: Uuid,
        flow: &mut CheckoutFlow,
        booking: &BookingDetails,
        method: PaymentMethod,
    ) -> Result<BookingConfirmation, CheckoutError> {
        let (passengers, fare) = match flow.stage() {
            CheckoutStage::SelectingPayment { passengers, fare } => (passengers.clone(), *fare),
            other => {
                return Err(CheckoutError::InvalidTransition {
                    from: other.name().to_string(),
                    to: "COMPLETED".to_string(),
                })
            }
        };

        let (train, class) = match (&booking.train, &booking.selected_class) {
            (Some(train), Some(class)) => (train, class),
            _ => {
                return Err(CheckoutError::IncompleteBooking(
                    "train and class must be selected".to_string(),
                ))
            }
        };

        if booking.fare != fare || booking.seat_count() != passengers.len() {
            return Err(CheckoutError::IncompleteBooking(
                "booking changed since passengers were submitted".to_string(),
            ));
        }

        let intent = self.gateway.create_intent(booking_id, fare.total, method).await?;
        let status = self.gateway.process_payment(&intent).await?;
        if status != PaymentStatus::Succeeded {
            tracing::warn!(%booking_id, intent_id = %intent.id, ?status, "Payment not completed");
            return Err(CheckoutError::PaymentDeclined(format!(
                "payment {} ended in {:?}",
                intent.id, status
            )));
        }

        let confirmation = BookingConfirmation {
            booking_id,
            pnr: generate_pnr(&mut rand::thread_rng()),
            train_number: train.number.clone(),
            train_name: train.name.clone(),
            class_type: class.class_type,
            class_name: class.name.clone(),
            journey_date: booking.departure_date,
            from: train.departure_station.name.clone(),
            to: train.arrival_station.name.clone(),
            departure_time: train.departure_time,
            arrival_time: train.arrival_time,
            seats: booking.selected_seats.ids(),
            passengers,
            fare,
            payment_method: method,
            payment_reference: intent.id,
            confirmed_at: chrono::Utc::now(),
        };

        flow.complete(confirmation.clone())?;
        tracing::info!(
            %booking_id,
            pnr = %confirmation.pnr,
            total = confirmation.fare.total,
            "Booking confirmed"
        );
        Ok(confirmation)
    }
}

/// Gateway that approves every positive charge.
pub struct MockPaymentGateway;

#[async_trait::async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_intent(
        &self,
        booking_id: Uuid,
        amount: u64,
        method: PaymentMethod,
    ) -> CoreResult<PaymentIntent> {
        if amount == 0 {
            return Err(CoreError::PaymentFailed("amount must be positive".to_string()));
        }
        Ok(PaymentIntent {
            id: format!("mock_pay_{}", booking_id.simple()),
            booking_id,
            amount,
            currency: "INR".to_string(),
            method,
            status: PaymentStatus::RequiresPaymentMethod,
            created_at: chrono::Utc::now(),
        })
    }

    async fn process_payment(&self, _intent: &PaymentIntent) -> CoreResult<PaymentStatus> {
        Ok(PaymentStatus::Succeeded)
    }
}

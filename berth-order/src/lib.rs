pub mod selection;
pub mod booking;
pub mod validator;
pub mod checkout;
pub mod orchestrator;
pub mod journey;
pub mod waitlist;

pub use selection::SeatSelection;
pub use booking::{reduce, BookingAction, BookingDetails, BookingSession};
pub use validator::{validate, validate_for_seats};
pub use checkout::{BookingConfirmation, CheckoutFlow, CheckoutStage};
pub use orchestrator::{CheckoutOrchestrator, MockPaymentGateway};
pub use journey::{list_journeys, DateOrder, Journey, JourneyPassenger, JourneyRepository, JourneyStatus, StatusFilter};
pub use waitlist::{lookup, PassengerStatus, TicketStatus, WaitingTicket, WaitlistRepository, WaitlistedPassenger};

use berth_core::{ClassType, CoreError, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Seat {0} is not available")]
    SeatUnavailable(String),

    #[error("Seat {0} is already selected")]
    AlreadySelected(String),

    #[error("Seat {0} is not part of this coach")]
    UnknownSeat(String),

    #[error("No train selected")]
    NoTrainSelected,

    #[error("No class selected")]
    NoClassSelected,

    #[error("Train {train} does not offer class {class}")]
    ClassNotOffered { train: String, class: ClassType },

    #[error("Class {0} is sold out")]
    ClassSoldOut(ClassType),
}

impl BookingError {
    /// The user-facing validation error, for the variants that have one.
    pub fn as_validation(&self) -> Option<ValidationError> {
        match self {
            BookingError::SeatUnavailable(seat_id) => Some(ValidationError::SeatUnavailable {
                seat_id: seat_id.clone(),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Booking incomplete: {0}")]
    IncompleteBooking(String),

    #[error("Passenger details invalid")]
    Invalid(Vec<ValidationError>),

    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Storage(String),
}

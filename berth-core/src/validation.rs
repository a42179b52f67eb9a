use serde::{Deserialize, Serialize};

/// Every way user input can be rejected. All variants are recoverable by
/// correcting the input; validators collect the complete list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationError {
    #[error("Please select a departure station")]
    MissingOriginStation,

    #[error("Please select an arrival station")]
    MissingDestinationStation,

    #[error("Departure and arrival stations cannot be the same")]
    SameOriginDestination,

    #[error("Please select a travel date")]
    MissingTravelDate,

    #[error("Seat {seat_id} is not available")]
    SeatUnavailable { seat_id: String },

    #[error("Passenger {}: name is required", passenger + 1)]
    NameRequired { passenger: usize },

    #[error("Passenger {}: valid age is required (1-120), got {age}", passenger + 1)]
    AgeOutOfRange { passenger: usize, age: i64 },

    #[error("Passenger {}: valid 12-digit ID is required", passenger + 1)]
    InvalidIdFormat { passenger: usize },

    #[error("Expected {expected} passenger(s), one per selected seat, got {actual}")]
    PassengerCountMismatch { expected: usize, actual: usize },
}

impl ValidationError {
    /// Form field the error belongs to, in `passenger{index}_{field}` form for
    /// passenger rows.
    pub fn field(&self) -> String {
        match self {
            ValidationError::MissingOriginStation => "from".to_string(),
            ValidationError::MissingDestinationStation => "to".to_string(),
            ValidationError::SameOriginDestination => "sameStations".to_string(),
            ValidationError::MissingTravelDate => "date".to_string(),
            ValidationError::SeatUnavailable { seat_id } => format!("seat_{}", seat_id),
            ValidationError::NameRequired { passenger } => format!("passenger{}_name", passenger),
            ValidationError::AgeOutOfRange { passenger, .. } => format!("passenger{}_age", passenger),
            ValidationError::InvalidIdFormat { passenger } => format!("passenger{}_nationalId", passenger),
            ValidationError::PassengerCountMismatch { .. } => "passengers".to_string(),
        }
    }
}

/// Turn a collected list into a `Result`: `Ok` only when nothing was found.
pub fn into_result(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub mod train;
pub mod layout;
pub mod fare;
pub mod repository;

pub use train::{parse_duration, Train, TrainClass};
pub use layout::{
    AvailabilitySource, BerthType, FixedAvailability, LayoutGenerator, LayoutPolicy, Position,
    Seat, SeatFilter, SeatState, SeededAvailability,
};
pub use fare::{compute_fare, FareBreakdown, FareCalculator, FareConfig};
pub use repository::TrainRepository;
pub use berth_core::{ClassFilter, ClassType, Station};

/// Catalog-related errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Fare must be positive for class {0}")]
    InvalidFare(ClassType),

    #[error("Unparseable duration: {0}")]
    InvalidDuration(String),

    #[error("Unparseable clock time: {0}")]
    InvalidClockTime(String),

    #[error("Station not found: {0}")]
    StationNotFound(String),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

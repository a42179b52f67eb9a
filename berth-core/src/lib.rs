pub mod class;
pub mod passenger;
pub mod payment;
pub mod search;
pub mod validation;

pub use class::{ClassFilter, ClassType};
pub use passenger::Passenger;
pub use search::{SearchCriteria, Station};
pub use validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Payment failed: {0}")]
    PaymentFailed(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

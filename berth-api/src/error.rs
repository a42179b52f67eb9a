use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use berth_catalog::CatalogError;
use berth_core::{CoreError, ValidationError};
use berth_order::{BookingError, CheckoutError, RepositoryError};
use berth_search::SearchError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<ValidationError>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Conflict {
        message: String,
        details: Vec<ValidationError>,
    },

    #[error("{0}")]
    PaymentDeclined(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict {
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn session_not_found(id: uuid::Uuid) -> Self {
        AppError::NotFound(format!("Booking session {} not found", id))
    }
}

fn detail(error: &ValidationError) -> Value {
    json!({
        "field": error.field(),
        "message": error.to_string(),
        "error": error,
    })
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, Vec::new()),
            AppError::Validation { message, details } => (StatusCode::BAD_REQUEST, message, details),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, Vec::new()),
            AppError::Conflict { message, details } => (StatusCode::CONFLICT, message, details),
            AppError::PaymentDeclined(msg) => (StatusCode::PAYMENT_REQUIRED, msg, Vec::new()),
            AppError::Internal(err) => {
                tracing::error!("Internal Server Error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    Vec::new(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "details": details.iter().map(detail).collect::<Vec<_>>(),
        }));

        (status, body).into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::StationNotFound(_) => AppError::NotFound(err.to_string()),
            other => AppError::Internal(other.into()),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidCriteria(details) => AppError::Validation {
                message: "Invalid search criteria".to_string(),
                details,
            },
            SearchError::Catalog(e) => e.into(),
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match &err {
            BookingError::UnknownSeat(_) | BookingError::ClassNotOffered { .. } => {
                AppError::NotFound(err.to_string())
            }
            _ => AppError::Conflict {
                message: err.to_string(),
                details: err.as_validation().into_iter().collect(),
            },
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Invalid(details) => AppError::Validation {
                message: "Passenger details invalid".to_string(),
                details,
            },
            CheckoutError::PaymentDeclined(msg) => AppError::PaymentDeclined(msg),
            CheckoutError::Core(e) => e.into(),
            other => AppError::conflict(other.to_string()),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::PaymentFailed(msg) => AppError::PaymentDeclined(msg),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Internal(err.into())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

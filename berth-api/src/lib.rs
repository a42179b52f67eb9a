use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod state;
pub mod error;
pub mod extract;
pub mod health;
pub mod stations;
pub mod search;
pub mod bookings;
pub mod checkout;
pub mod journeys;
pub mod waitlist;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::USER_AGENT]);

    Router::new()
        .merge(health::routes())
        .merge(stations::routes())
        .merge(search::routes())
        .merge(bookings::routes())
        .merge(checkout::routes())
        .merge(journeys::routes())
        .merge(waitlist::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

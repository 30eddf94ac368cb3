use axum::Router;

use crate::state::AppState;

pub mod bookings;
pub mod checkout;
pub mod doc;
pub mod gear;
pub mod health;
pub mod params;
pub mod profiles;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/gear", gear::router())
        .nest("/bookings", bookings::router())
        .nest("/profiles", profiles::router())
        .nest("/checkout", checkout::router())
}

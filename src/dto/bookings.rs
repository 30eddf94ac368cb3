use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{models::Booking, pricing::RentalType};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub gear_id: Uuid,
    pub rental_type: RentalType,
    /// Hours or days depending on the rental type; clamped server-side.
    pub quantity: i64,
    pub start_date: DateTime<Utc>,
    /// Redirect target for the checkout session; falls back to the
    /// configured frontend origin.
    #[serde(default)]
    pub frontend_origin: Option<String>,
}

/// Outcome of a booking request. `checkout_url` is absent when the booking
/// row was persisted but the payment processor could not be reached; the
/// envelope message tells the two cases apart.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingCheckout {
    pub booking: Booking,
    pub checkout_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingList {
    pub items: Vec<Booking>,
}

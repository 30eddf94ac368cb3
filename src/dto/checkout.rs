use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of the checkout proxy. Fields are optional at the serde layer so
/// absence surfaces as the contract's field-missing error rather than a
/// deserialization rejection.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutSessionRequest {
    pub booking_id: Option<String>,
    pub gear_name: Option<String>,
    pub total_price: Option<f64>,
    /// Redirect target; falls back to the configured frontend origin.
    /// Accepts the older camelCase spelling for compatibility.
    #[serde(default, alias = "frontendOrigin")]
    pub frontend_origin: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutSessionResponse {
    pub url: String,
}

/// Flat error body required by the checkout contract.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutErrorResponse {
    pub error: String,
}

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info};

use super::{PaymentError, PaymentResult};

const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Everything needed to open a hosted checkout session for one booking.
#[derive(Debug, Clone)]
pub struct CheckoutSessionParams {
    pub booking_id: String,
    /// Display name on the Stripe line item; falls back to a generic label.
    pub gear_name: Option<String>,
    /// Whole currency units; converted to minor units for Stripe.
    pub total_price: f64,
    /// Redirect target for both the success and cancel URLs.
    pub frontend_origin: String,
}

/// Thin client for Stripe's checkout-session endpoint.
///
/// Requests are form-encoded per Stripe's API and authorized with the
/// secret key as a bearer token.
#[derive(Clone)]
pub struct StripeClient {
    secret_key: String,
    api_base_url: String,
    http: Client,
}

impl StripeClient {
    pub fn new(secret_key: impl Into<String>) -> PaymentResult<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| PaymentError::Configuration(e.to_string()))?;

        Ok(Self {
            secret_key: secret_key.into(),
            api_base_url: STRIPE_API_BASE.to_string(),
            http,
        })
    }

    /// Point the client at a different base URL (for tests against a stub).
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Create a checkout session and return the hosted redirect URL.
    pub async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> PaymentResult<String> {
        let form = build_form_params(params);
        debug!(booking_id = %params.booking_id, "creating Stripe checkout session");

        let url = format!("{}/v1/checkout/sessions", self.api_base_url);
        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.secret_key))
            .form(&form)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        if !status.is_success() {
            error!(status = %status, body = %body, "Stripe checkout session failed");
            return Err(PaymentError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let session: CheckoutSessionResponse = serde_json::from_str(&body)
            .map_err(|e| PaymentError::UnexpectedResponse(e.to_string()))?;

        info!(
            booking_id = %params.booking_id,
            session_id = %session.id,
            "created Stripe checkout session"
        );

        Ok(session.url)
    }
}

#[derive(Debug, Deserialize)]
struct CheckoutSessionResponse {
    id: String,
    url: String,
}

/// Build the form-encoded body for the session-creation request: one line
/// item at `round(total_price × 100)` minor units, quantity 1, one-time
/// payment mode, with the booking id attached as metadata for webhook
/// reconciliation.
pub fn build_form_params(params: &CheckoutSessionParams) -> Vec<(String, String)> {
    let unit_amount = (params.total_price * 100.0).round() as i64;
    let product_name = params
        .gear_name
        .clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Camera Equipment Rental".to_string());

    vec![
        (
            "payment_method_types[]".to_string(),
            "card".to_string(),
        ),
        (
            "line_items[0][price_data][currency]".to_string(),
            "usd".to_string(),
        ),
        (
            "line_items[0][price_data][product_data][name]".to_string(),
            product_name,
        ),
        (
            "line_items[0][price_data][product_data][description]".to_string(),
            format!("Booking ID: {}", params.booking_id),
        ),
        (
            "line_items[0][price_data][unit_amount]".to_string(),
            unit_amount.to_string(),
        ),
        ("line_items[0][quantity]".to_string(), "1".to_string()),
        ("mode".to_string(), "payment".to_string()),
        (
            "success_url".to_string(),
            success_url(&params.frontend_origin),
        ),
        ("cancel_url".to_string(), params.frontend_origin.clone()),
        (
            "metadata[booking_id]".to_string(),
            params.booking_id.clone(),
        ),
    ]
}

/// Success redirect: the origin with Stripe's session-id template appended,
/// preserving any query string already present.
fn success_url(origin: &str) -> String {
    let separator = if origin.contains('?') { '&' } else { '?' };
    format!("{origin}{separator}session_id={{CHECKOUT_SESSION_ID}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> CheckoutSessionParams {
        CheckoutSessionParams {
            booking_id: "b1".to_string(),
            gear_name: Some("Tripod".to_string()),
            total_price: 45.5,
            frontend_origin: "https://lensshare.example".to_string(),
        }
    }

    fn lookup<'a>(form: &'a [(String, String)], key: &str) -> &'a str {
        form.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or_else(|| panic!("missing form key {key}"))
    }

    #[test]
    fn unit_amount_is_rounded_minor_units() {
        let form = build_form_params(&params());
        assert_eq!(
            lookup(&form, "line_items[0][price_data][unit_amount]"),
            "4550"
        );
        assert_eq!(lookup(&form, "line_items[0][quantity]"), "1");
    }

    #[test]
    fn booking_id_rides_along_as_metadata() {
        let form = build_form_params(&params());
        assert_eq!(lookup(&form, "metadata[booking_id]"), "b1");
        assert_eq!(
            lookup(&form, "line_items[0][price_data][product_data][description]"),
            "Booking ID: b1"
        );
    }

    #[test]
    fn session_is_one_time_payment_in_usd() {
        let form = build_form_params(&params());
        assert_eq!(lookup(&form, "mode"), "payment");
        assert_eq!(lookup(&form, "line_items[0][price_data][currency]"), "usd");
        assert_eq!(
            lookup(&form, "line_items[0][price_data][product_data][name]"),
            "Tripod"
        );
    }

    #[test]
    fn missing_gear_name_falls_back_to_generic_label() {
        let mut p = params();
        p.gear_name = None;
        let form = build_form_params(&p);
        assert_eq!(
            lookup(&form, "line_items[0][price_data][product_data][name]"),
            "Camera Equipment Rental"
        );
    }

    #[test]
    fn redirect_urls_derive_from_the_origin() {
        let form = build_form_params(&params());
        assert_eq!(
            lookup(&form, "success_url"),
            "https://lensshare.example?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(lookup(&form, "cancel_url"), "https://lensshare.example");
    }

    #[test]
    fn success_url_respects_existing_query_string() {
        assert_eq!(
            success_url("https://a.example/path?tab=bookings"),
            "https://a.example/path?tab=bookings&session_id={CHECKOUT_SESSION_ID}"
        );
    }

    #[test]
    fn whole_dollar_amounts_convert_exactly() {
        let mut p = params();
        p.total_price = 80.0;
        let form = build_form_params(&p);
        assert_eq!(
            lookup(&form, "line_items[0][price_data][unit_amount]"),
            "8000"
        );
    }
}

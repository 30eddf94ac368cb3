use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};

use crate::{
    dto::checkout::{CheckoutErrorResponse, CheckoutSessionRequest, CheckoutSessionResponse},
    payments::{CheckoutSessionParams, PaymentError},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/session", post(create_checkout_session))
}

/// Checkout failures use a flat `{ "error": ... }` body instead of the
/// `/api` envelope; the payment client's display messages are already
/// scrubbed of processor detail.
pub struct CheckoutFailure(PaymentError);

impl From<PaymentError> for CheckoutFailure {
    fn from(err: PaymentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CheckoutFailure {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = CheckoutErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Stateless proxy to Stripe's checkout-session endpoint.
///
/// Deliberately idempotency-unaware: two calls for the same booking id open
/// two distinct sessions. Reconciliation happens through the booking id in
/// the session metadata.
#[utoipa::path(
    post,
    path = "/api/checkout/session",
    request_body = CheckoutSessionRequest,
    responses(
        (status = 200, description = "Hosted checkout redirect URL", body = CheckoutSessionResponse),
        (status = 400, description = "Missing fields or Stripe not configured", body = CheckoutErrorResponse),
        (status = 500, description = "Checkout session could not be created", body = CheckoutErrorResponse),
    ),
    tag = "Checkout"
)]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutSessionRequest>,
) -> Result<Json<CheckoutSessionResponse>, CheckoutFailure> {
    let stripe = state.stripe.as_ref().ok_or_else(|| {
        CheckoutFailure(PaymentError::Configuration(
            "STRIPE_SECRET_KEY is not set".into(),
        ))
    })?;

    let params = validate_request(payload, state.frontend_origin.as_deref())?;
    let url = stripe.create_checkout_session(&params).await?;

    Ok(Json(CheckoutSessionResponse { url }))
}

/// Turn the loosely-typed wire body into session parameters, or report which
/// class of field is missing. The redirect origin comes from the request
/// when supplied, else from configuration; the incoming request's own origin
/// is never used.
fn validate_request(
    payload: CheckoutSessionRequest,
    fallback_origin: Option<&str>,
) -> Result<CheckoutSessionParams, PaymentError> {
    let booking_id = payload.booking_id.filter(|id| !id.is_empty());
    let total_price = payload.total_price.filter(|p| *p > 0.0);
    let frontend_origin = payload
        .frontend_origin
        .filter(|o| !o.is_empty())
        .or_else(|| fallback_origin.map(str::to_string));

    match (booking_id, total_price, frontend_origin) {
        (Some(booking_id), Some(total_price), Some(frontend_origin)) => {
            Ok(CheckoutSessionParams {
                booking_id,
                gear_name: payload.gear_name,
                total_price,
                frontend_origin,
            })
        }
        _ => Err(PaymentError::MissingFields),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CheckoutSessionRequest {
        CheckoutSessionRequest {
            booking_id: Some("b1".to_string()),
            gear_name: Some("Tripod".to_string()),
            total_price: Some(45.5),
            frontend_origin: Some("https://lensshare.example".to_string()),
        }
    }

    #[test]
    fn well_formed_request_passes_validation() {
        let params = validate_request(request(), None).unwrap();
        assert_eq!(params.booking_id, "b1");
        assert_eq!(params.total_price, 45.5);
        assert_eq!(params.frontend_origin, "https://lensshare.example");
    }

    #[test]
    fn missing_booking_id_is_rejected() {
        let mut req = request();
        req.booking_id = None;
        assert!(matches!(
            validate_request(req, None),
            Err(PaymentError::MissingFields)
        ));

        let mut req = request();
        req.booking_id = Some(String::new());
        assert!(matches!(
            validate_request(req, None),
            Err(PaymentError::MissingFields)
        ));
    }

    #[test]
    fn missing_or_non_positive_price_is_rejected() {
        for price in [None, Some(0.0), Some(-3.5)] {
            let mut req = request();
            req.total_price = price;
            assert!(matches!(
                validate_request(req, None),
                Err(PaymentError::MissingFields)
            ));
        }
    }

    #[test]
    fn origin_falls_back_to_configuration() {
        let mut req = request();
        req.frontend_origin = None;
        let params = validate_request(req, Some("https://fallback.example")).unwrap();
        assert_eq!(params.frontend_origin, "https://fallback.example");

        let mut req = request();
        req.frontend_origin = None;
        assert!(matches!(
            validate_request(req, None),
            Err(PaymentError::MissingFields)
        ));
    }

    #[test]
    fn validation_failures_render_the_contract_body() {
        let response = CheckoutFailure(PaymentError::MissingFields).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = CheckoutFailure(PaymentError::Configuration("unset".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = CheckoutFailure(PaymentError::Provider {
            status: 402,
            body: "raw processor detail".into(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

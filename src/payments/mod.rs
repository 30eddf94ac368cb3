//! Stripe hosted-checkout integration.
//!
//! The service never touches card data; it creates a checkout session and
//! hands the renter Stripe's redirect URL.

mod stripe;

pub use stripe::{CheckoutSessionParams, StripeClient};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    /// Processor credential missing or client setup failed.
    #[error("Stripe configuration not available")]
    Configuration(String),

    /// Required request fields absent or empty.
    #[error("Missing required fields")]
    MissingFields,

    /// Stripe answered with a non-success status. The body is kept for
    /// logging and must not reach the caller.
    #[error("Failed to create checkout session")]
    Provider { status: u16, body: String },

    /// Transport-level failure reaching Stripe.
    #[error("{0}")]
    Network(String),

    /// Stripe answered 2xx with a body we could not interpret.
    #[error("{0}")]
    UnexpectedResponse(String),
}

impl PaymentError {
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 400,
            PaymentError::MissingFields => 400,
            PaymentError::Provider { .. } => 500,
            PaymentError::Network(_) => 500,
            PaymentError::UnexpectedResponse(_) => 500,
        }
    }
}

pub type PaymentResult<T> = Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_client_errors() {
        assert_eq!(PaymentError::MissingFields.status_code(), 400);
        assert_eq!(
            PaymentError::Configuration("unset".into()).status_code(),
            400
        );
    }

    #[test]
    fn provider_failures_map_to_server_errors() {
        let err = PaymentError::Provider {
            status: 402,
            body: "card_declined".into(),
        };
        assert_eq!(err.status_code(), 500);
        // The processor's body must never surface in the display message.
        assert_eq!(err.to_string(), "Failed to create checkout session");
    }
}

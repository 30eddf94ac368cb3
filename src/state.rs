use crate::{
    db::{DbPool, OrmConn},
    payments::StripeClient,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    /// None when `STRIPE_SECRET_KEY` is unset; checkout requests then fail
    /// with a configuration error instead of the whole service refusing to boot.
    pub stripe: Option<StripeClient>,
    /// Fallback redirect origin for checkout sessions.
    pub frontend_origin: Option<String>,
}

use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Absent key is not a startup error; the checkout proxy reports it
    /// per-request as a configuration failure.
    pub stripe_secret_key: Option<String>,
    /// Fallback redirect origin when a checkout request carries none.
    pub frontend_origin: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let stripe_secret_key = env::var("STRIPE_SECRET_KEY").ok().filter(|k| !k.is_empty());
        let frontend_origin = env::var("FRONTEND_ORIGIN").ok().filter(|o| !o.is_empty());
        Ok(Self {
            database_url,
            host,
            port,
            stripe_secret_key,
            frontend_origin,
        })
    }
}

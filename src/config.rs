//! Service configuration.
//!
//! Pricing rules are not configured here; they arrive with every request.

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// CORS allowed origins, `*` for any.
    pub cors_origins: Vec<String>,

    /// Name reported by the health endpoint.
    pub service_name: String,
}

impl AppConfig {
    /// Load configuration from `.env` (if present) and the environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or(defaults.cors_origins),
            service_name: std::env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            cors_origins: vec!["http://localhost:3000".into()],
            service_name: "booking-pricing".into(),
        }
    }
}

fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

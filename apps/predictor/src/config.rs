use anyhow::{Context, Result};

const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Application configuration loaded from environment variables.
/// Every variable has a default, so a bare `cargo run` talks to a local service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base address of the prediction service, without a trailing slash.
    pub api_base: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base: normalize_base(
                &std::env::var("PREDICTOR_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            ),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Trims whitespace and trailing slashes so `{base}/api/predict` never doubles up.
/// An empty value falls back to the local default.
pub fn normalize_base(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE.to_string()
    } else {
        trimmed.to_string()
    }
}

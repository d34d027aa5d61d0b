use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Stepper configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub publisher_base_url: String,
    pub access_token: String,
    /// OAuth scopes granted to the access token; decides publisher capability.
    pub scopes: Vec<String>,
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            publisher_base_url: env::var("PUBLISHER_BASE_URL")
                .unwrap_or_else(|_| publisher_client::DEFAULT_BASE_URL.to_string()),
            access_token: env::var("PUBLISHER_ACCESS_TOKEN")
                .context("PUBLISHER_ACCESS_TOKEN must be set")?,
            scopes: env::var("PUBLISHER_SCOPES")
                .map(|raw| parse_scopes(&raw))
                .unwrap_or_default(),
            request_timeout_secs: env::var("PUBLISHER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("PUBLISHER_TIMEOUT_SECS must be a valid number")?,
        })
    }
}

/// Scopes arrive space separated, as in an OAuth token response.
fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

use anyhow::{bail, Context, Result};

use crate::session::DEFAULT_SESSION_TTL_MINUTES;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Application configuration loaded from environment variables.
/// Fails at startup if the Gemini key is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Sessions older than this many minutes are discarded.
    pub session_ttl_minutes: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let google_api_key = require_env("GOOGLE_API_KEY")?;
        validate_api_key(&google_api_key)?;

        Ok(Config {
            google_api_key,
            gemini_model: std::env::var("GEMINI_MODEL")
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            session_ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .unwrap_or_else(|_| DEFAULT_SESSION_TTL_MINUTES.to_string())
                .parse::<i64>()
                .ok()
                .filter(|m| *m > 0)
                .context("SESSION_TTL_MINUTES must be a positive number of minutes")?,
        })
    }

    /// First characters of the key, safe to put in logs.
    pub fn api_key_hint(&self) -> String {
        let prefix: String = self.google_api_key.chars().take(10).collect();
        format!("{prefix}...")
    }
}

/// Google API keys are longer than 20 characters and start with `AIza`.
pub fn validate_api_key(key: &str) -> Result<()> {
    if key.len() <= 20 || !key.starts_with("AIza") {
        bail!("GOOGLE_API_KEY has an invalid format (expected an 'AIza...' key)");
    }
    Ok(())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

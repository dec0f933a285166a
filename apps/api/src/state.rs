use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model access. `LlmClient` in production, a scripted generator in tests.
    pub llm: Arc<dyn TextGenerator>,
    pub sessions: SessionStore,
    pub config: Config,
}

#[cfg(test)]
pub fn test_state(llm: Arc<dyn TextGenerator>) -> AppState {
    AppState {
        llm,
        sessions: SessionStore::new(),
        config: Config {
            google_api_key: "AIzaSyTEST_KEY_0123456789".to_string(),
            gemini_model: crate::config::DEFAULT_MODEL.to_string(),
            gemini_base_url: crate::config::DEFAULT_BASE_URL.to_string(),
            port: 8080,
            rust_log: "info".to_string(),
            session_ttl_minutes: crate::session::DEFAULT_SESSION_TTL_MINUTES,
        },
    }
}

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::config::validate_api_key;
use crate::errors::AppError;
use crate::llm_client::CONNECTION_PROFILE;
use crate::state::AppState;

const CONNECTION_PROMPT: &str = "Responda apenas: OK";

#[derive(Debug, Serialize)]
pub struct ConnectionStatus {
    pub status: &'static str,
    pub model: String,
    pub reply: String,
}

/// GET /api/v1/connection
///
/// Checks the key format, then makes one minimal call against the primary
/// model. Connection checks never fall back.
pub async fn handle_connection_check(
    State(state): State<AppState>,
) -> Result<Json<ConnectionStatus>, AppError> {
    validate_api_key(&state.config.google_api_key)
        .map_err(|e| AppError::Config(e.to_string()))?;

    let generation = state.llm.generate(CONNECTION_PROMPT, &CONNECTION_PROFILE).await?;
    info!("Connection check succeeded on {}", generation.model);

    Ok(Json(ConnectionStatus {
        status: "connected",
        model: generation.model,
        reply: generation.text.trim().to_string(),
    }))
}

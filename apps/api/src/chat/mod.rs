//! Free-form career Q&A grounded on the session's analysis.
//!
//! Chat never surfaces upstream failures: the user gets a fixed apology and
//! the cause goes to the log.

pub mod prompts;

use serde::Serialize;
use tracing::{error, info};

use crate::chat::prompts::build_chat_prompt;
use crate::errors::AppError;
use crate::llm_client::{LlmError, TextGenerator, CHAT_PROFILE};
use crate::models::AnalysisResult;

pub const REPHRASE_REPLY: &str =
    "Desculpe, tive um problema ao processar sua pergunta. Pode reformular?";
pub const FAILURE_REPLY: &str = "Ops! Algo deu errado. Pode tentar novamente?";

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub reply: String,
    /// Model that answered; `None` when the reply is a fallback apology.
    pub model: Option<String>,
}

/// One-line-per-fact summary of an analysis, used as chat context.
pub fn analysis_context(analysis: &AnalysisResult) -> String {
    let mut lines = Vec::new();
    if let Some(title) = analysis.profession.as_ref().and_then(|p| p.title.as_deref()) {
        lines.push(format!("Profissão: {title}"));
    }
    if let Some(seniority) = &analysis.seniority {
        if let Some(level) = seniority.level.as_deref() {
            let years = seniority
                .years
                .as_ref()
                .map(|y| format!(" ({y} anos)"))
                .unwrap_or_default();
            lines.push(format!("Senioridade: {level}{years}"));
        }
    }
    let skills: Vec<&str> = analysis
        .technical_gaps()
        .iter()
        .filter_map(|g| g.skill.as_deref())
        .collect();
    if !skills.is_empty() {
        lines.push(format!("Lacunas técnicas: {}", skills.join(", ")));
    }
    if let Some(role) = analysis.next_role.as_ref().and_then(|r| r.title.as_deref()) {
        lines.push(format!("Próximo cargo: {role}"));
    }
    lines.join("\n")
}

pub async fn chat(
    llm: &dyn TextGenerator,
    message: &str,
    context: Option<&str>,
) -> Result<ChatReply, AppError> {
    let message = message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let prompt = build_chat_prompt(message, context);
    match llm.generate(&prompt, &CHAT_PROFILE).await {
        Ok(generation) => {
            info!("Chat answered by {}", generation.model);
            Ok(ChatReply {
                reply: generation.text.trim().to_string(),
                model: Some(generation.model),
            })
        }
        Err(e @ (LlmError::Api { .. } | LlmError::Exhausted { .. })) => {
            error!("Chat request rejected: {e}");
            Ok(apology(REPHRASE_REPLY))
        }
        Err(e) => {
            error!("Chat request failed: {e}");
            Ok(apology(FAILURE_REPLY))
        }
    }
}

fn apology(text: &str) -> ChatReply {
    ChatReply {
        reply: text.to_string(),
        model: None,
    }
}

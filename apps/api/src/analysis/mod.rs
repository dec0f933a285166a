//! Résumé analysis — sanitize the text, prompt the model, normalize the reply.

pub mod prompts;

use tracing::info;

use crate::analysis::prompts::build_analysis_prompt;
use crate::errors::AppError;
use crate::llm_client::{generate_json, TextGenerator, ANALYSIS_PROFILE};
use crate::models::AnalysisResult;

/// Hard ceiling on résumé length, in characters.
pub const MAX_RESUME_CHARS: usize = 50_000;

/// Validates and cleans résumé text before it goes into a prompt.
///
/// Rejects empty and oversized text. Strips ASCII control characters other
/// than tab, LF and CR, then trims.
pub fn sanitize_resume_text(text: &str) -> Result<String, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("Resume text is empty".to_string()));
    }

    let length = text.chars().count();
    if length > MAX_RESUME_CHARS {
        return Err(AppError::Validation(format!(
            "Resume text is too long ({length} characters). Maximum: {MAX_RESUME_CHARS}"
        )));
    }

    let cleaned: String = text.chars().filter(|c| !is_stripped_control(*c)).collect();
    Ok(cleaned.trim().to_string())
}

fn is_stripped_control(c: char) -> bool {
    matches!(
        c,
        '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}'
    )
}

/// Runs the full analysis: sanitize → prompt → model → normalize.
/// Input errors are raised before any network call.
pub async fn analyze_resume(
    llm: &dyn TextGenerator,
    resume_text: &str,
) -> Result<AnalysisResult, AppError> {
    let text = sanitize_resume_text(resume_text)?;
    info!("Analyzing resume: {} characters", text.chars().count());

    let prompt = build_analysis_prompt(&text);
    let analysis: AnalysisResult = generate_json(llm, &prompt, &ANALYSIS_PROFILE).await?;

    info!("Resume analysis complete");
    Ok(analysis)
}

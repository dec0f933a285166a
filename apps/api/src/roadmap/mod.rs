//! Goal-to-roadmap generation.

pub mod prompts;

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{generate_json, TextGenerator, ROADMAP_PROFILE};
use crate::models::RoadmapResult;
use crate::roadmap::prompts::build_roadmap_prompt;

/// Validates a user-supplied career goal. Returns the trimmed goal.
pub fn validate_career_goal(goal: &str) -> Result<String, AppError> {
    let goal = goal.trim();
    if goal.is_empty() {
        return Err(AppError::Validation(
            "career_goal cannot be empty".to_string(),
        ));
    }
    Ok(goal.to_string())
}

/// Builds a roadmap from the résumé toward `career_goal`.
/// The résumé is truncated for the prompt; it is never rejected for length.
pub async fn generate_roadmap(
    llm: &dyn TextGenerator,
    resume_text: &str,
    career_goal: &str,
) -> Result<RoadmapResult, AppError> {
    let career_goal = validate_career_goal(career_goal)?;
    info!("Generating roadmap for goal: {career_goal}");

    let prompt = build_roadmap_prompt(resume_text, &career_goal);
    let roadmap: RoadmapResult = generate_json(llm, &prompt, &ROADMAP_PROFILE).await?;

    info!("Roadmap generated with {} phases", roadmap.phases.len());
    Ok(roadmap)
}

use serde::Serialize;

use crate::dashboard::cards::{or_placeholder, MetricCard};
use crate::models::roadmap::RoadmapPhase;
use crate::models::RoadmapResult;

const GOOD_COLOR: &str = "#00ffaa";
const WARN_COLOR: &str = "#ffaa00";
const BAD_COLOR: &str = "#ff6b6b";

/// One expandable roadmap phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhasePanel {
    pub heading: String,
    pub order: String,
    pub title: String,
    pub timeframe: String,
    pub expanded: bool,
    pub actions: Vec<String>,
    pub skills_to_develop: Vec<String>,
    pub resources: Vec<String>,
    pub success_indicators: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoadmapView {
    pub viability: MetricCard,
    pub success_probability: MetricCard,
    pub difficulty: MetricCard,
    pub intermediate_roles: Vec<String>,
    pub phases: Vec<PhasePanel>,
    /// Set when the model returned no phases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub critical_factors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

pub fn render_roadmap(roadmap: &RoadmapResult) -> RoadmapView {
    let phases: Vec<PhasePanel> = roadmap.phases.iter().map(phase_panel).collect();
    let notice = phases
        .is_empty()
        .then(|| "Nenhuma etapa foi gerada no roadmap".to_string());

    RoadmapView {
        viability: viability_card(roadmap),
        success_probability: probability_card(roadmap),
        difficulty: difficulty_card(roadmap),
        intermediate_roles: roadmap.intermediate_roles.clone(),
        phases,
        notice,
        critical_factors: roadmap.critical_factors.clone(),
        observations: roadmap
            .observations
            .clone()
            .filter(|o| !o.trim().is_empty()),
    }
}

fn viability_card(roadmap: &RoadmapResult) -> MetricCard {
    let value = if roadmap.feasible.unwrap_or(true) {
        "✓ VIÁVEL"
    } else {
        "⚠ DESAFIADOR"
    };
    MetricCard::new(
        "Viabilidade",
        value,
        or_placeholder(roadmap.timeframe.as_deref()),
    )
}

fn probability_card(roadmap: &RoadmapResult) -> MetricCard {
    let tier = roadmap
        .success_probability
        .as_deref()
        .unwrap_or("média")
        .trim()
        .to_lowercase();
    let (range, color) = match tier.as_str() {
        "alta" => ("75-90%", GOOD_COLOR),
        "média" => ("50-70%", WARN_COLOR),
        "baixa" => ("20-40%", BAD_COLOR),
        _ => ("N/A", BAD_COLOR),
    };
    MetricCard::new("Probabilidade de Sucesso", tier.to_uppercase(), range).with_color(color)
}

fn difficulty_card(roadmap: &RoadmapResult) -> MetricCard {
    let tier = roadmap
        .difficulty
        .as_deref()
        .unwrap_or("médio")
        .trim()
        .to_lowercase();
    let color = match tier.as_str() {
        "médio" => WARN_COLOR,
        "alto" => BAD_COLOR,
        _ => GOOD_COLOR,
    };
    let caption = roadmap
        .estimated_investment
        .as_deref()
        .unwrap_or("Consulte detalhes");
    MetricCard::new("Nível de Desafio", tier.to_uppercase(), caption).with_color(color)
}

fn phase_panel(phase: &RoadmapPhase) -> PhasePanel {
    let order = phase
        .order
        .as_ref()
        .map(|o| o.to_string())
        .unwrap_or_else(|| "?".to_string());
    let title = phase
        .title
        .clone()
        .unwrap_or_else(|| "Etapa sem título".to_string());
    let timeframe = phase
        .timeframe
        .clone()
        .unwrap_or_else(|| "Prazo não definido".to_string());

    PhasePanel {
        heading: format!("Etapa {order}: {title} ({timeframe})"),
        // Phase one opens expanded whether `ordem` came as 1 or "1".
        expanded: phase.order.as_ref().and_then(|o| o.as_i64()) == Some(1),
        order,
        title,
        timeframe,
        actions: phase.actions.clone(),
        skills_to_develop: phase.skills_to_develop.clone(),
        resources: phase.resources.clone(),
        success_indicators: phase.success_indicators.clone(),
    }
}

use serde::Serialize;

use crate::models::AnalysisResult;

/// Shown wherever the model left a field out.
pub const PLACEHOLDER: &str = "N/A";

/// A single summary card: a small label, a headline value and a caption.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub caption: String,
    /// Accent colour for the value, when the card has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
}

impl MetricCard {
    pub fn new(label: &str, value: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
            caption: caption.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: &'static str) -> Self {
        self.color = Some(color);
        self
    }
}

pub(crate) fn or_placeholder(value: Option<&str>) -> String {
    value.unwrap_or(PLACEHOLDER).to_string()
}

/// Years of experience as displayed, `0` when absent.
pub(crate) fn years_label(analysis: &AnalysisResult) -> String {
    analysis
        .seniority
        .as_ref()
        .and_then(|s| s.years.as_ref())
        .map(|y| y.to_string())
        .unwrap_or_else(|| "0".to_string())
}

/// Profession, seniority, gap count and projected role.
pub fn analysis_cards(analysis: &AnalysisResult) -> Vec<MetricCard> {
    let profession = analysis.profession.as_ref();
    let seniority = analysis.seniority.as_ref();
    let next_role = analysis.next_role.as_ref();
    let gap_count = analysis.technical_gaps().len() + analysis.behavioral_gaps().len();

    vec![
        MetricCard::new(
            "Profissão Identificada",
            or_placeholder(profession.and_then(|p| p.title.as_deref())),
            format!(
                "Confiança: {}",
                or_placeholder(profession.and_then(|p| p.confidence.as_deref()))
            ),
        ),
        MetricCard::new(
            "Senioridade",
            or_placeholder(seniority.and_then(|s| s.level.as_deref())),
            format!("{} anos", years_label(analysis)),
        ),
        MetricCard::new("Áreas de Melhoria", gap_count.to_string(), "Identificadas"),
        MetricCard::new(
            "Projeção Natural",
            or_placeholder(next_role.and_then(|r| r.title.as_deref())),
            format!(
                "Em {}",
                or_placeholder(next_role.and_then(|r| r.timeframe.as_deref()))
            ),
        ),
    ]
}

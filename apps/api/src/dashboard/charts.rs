//! Chart specs for the analysis dashboard. The client draws them; this module
//! only decides what goes in.

use serde::Serialize;

use crate::dashboard::cards::{years_label, PLACEHOLDER};
use crate::models::analysis::TechnicalGap;
use crate::models::AnalysisResult;

/// At most this many technical gaps are plotted.
pub const RADAR_MAX_SKILLS: usize = 8;

pub const SENIORITY_TIERS: [&str; 4] = ["Júnior", "Pleno", "Sênior", "Especialista"];
const SENIORITY_HEIGHTS: [u8; 4] = [25, 50, 75, 100];
/// `Pleno`, used when the level is missing or not one of the tiers.
const DEFAULT_TIER: usize = 1;

const HIGHLIGHT_COLOR: &str = "#00d4ff";
const MUTED_COLOR: &str = "#555555";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub title: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<u8>,
    /// Radial axis bounds.
    pub range: [u8; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: &'static str,
    pub y_axis_title: &'static str,
    pub categories: Vec<&'static str>,
    pub values: Vec<u8>,
    pub colors: Vec<&'static str>,
    /// Per-bar text; only the highlighted bar has one.
    pub labels: Vec<String>,
    pub highlighted: usize,
}

/// Importance tier → radar weight. Unknown or missing tiers weigh as medium.
pub fn importance_score(importance: Option<&str>) -> u8 {
    match importance.map(|i| i.trim().to_lowercase()).as_deref() {
        Some("alta") | Some("high") => 3,
        Some("média") | Some("media") | Some("medium") => 2,
        Some("baixa") | Some("low") => 1,
        _ => 2,
    }
}

/// Radar over the first eight technical gaps. `None` when there are none.
pub fn skills_radar(gaps: &[TechnicalGap]) -> Option<RadarChart> {
    if gaps.is_empty() {
        return None;
    }

    let top = &gaps[..gaps.len().min(RADAR_MAX_SKILLS)];
    Some(RadarChart {
        title: "Top Skills Identificadas",
        labels: top
            .iter()
            .map(|g| g.skill.as_deref().unwrap_or(PLACEHOLDER).to_string())
            .collect(),
        values: top
            .iter()
            .map(|g| importance_score(g.importance.as_deref()))
            .collect(),
        range: [0, 3],
    })
}

/// Bar over the four fixed seniority tiers with the current one highlighted.
pub fn seniority_bar(analysis: &AnalysisResult) -> BarChart {
    let level = analysis
        .seniority
        .as_ref()
        .and_then(|s| s.level.as_deref())
        .map(str::trim);
    let highlighted = level
        .and_then(|l| SENIORITY_TIERS.iter().position(|tier| *tier == l))
        .unwrap_or(DEFAULT_TIER);
    let years = years_label(analysis);

    BarChart {
        title: "Nível de Senioridade",
        y_axis_title: "Maturidade Profissional (%)",
        categories: SENIORITY_TIERS.to_vec(),
        values: SENIORITY_HEIGHTS.to_vec(),
        colors: (0..SENIORITY_TIERS.len())
            .map(|i| if i == highlighted { HIGHLIGHT_COLOR } else { MUTED_COLOR })
            .collect(),
        labels: (0..SENIORITY_TIERS.len())
            .map(|i| {
                if i == highlighted {
                    format!("{years} anos")
                } else {
                    String::new()
                }
            })
            .collect(),
        highlighted,
    }
}

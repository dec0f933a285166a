// Presentation layer: read-only mapping of a session onto render-ready view models.
// Nothing here fails; missing fields become placeholders.

pub mod cards;
pub mod charts;
pub mod report;
pub mod roadmap_view;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::dashboard::cards::{analysis_cards, MetricCard};
use crate::dashboard::charts::{seniority_bar, skills_radar, BarChart, RadarChart};
use crate::dashboard::roadmap_view::{render_roadmap, RoadmapView};
use crate::models::AnalysisResult;
use crate::session::Session;

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisView {
    pub cards: Vec<MetricCard>,
    /// Absent when the analysis has no technical gaps.
    pub skills_radar: Option<RadarChart>,
    pub seniority_bar: BarChart,
    /// The record itself, for detail panels.
    pub detail: AnalysisResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub analysis: AnalysisView,
    pub career_goal: Option<String>,
    pub roadmap: Option<RoadmapView>,
}

pub fn render_analysis(analysis: &AnalysisResult) -> AnalysisView {
    AnalysisView {
        cards: analysis_cards(analysis),
        skills_radar: skills_radar(analysis.technical_gaps()),
        seniority_bar: seniority_bar(analysis),
        detail: analysis.clone(),
    }
}

pub fn render_dashboard(session: &Session) -> DashboardView {
    DashboardView {
        session_id: session.id,
        created_at: session.created_at,
        analysis: render_analysis(&session.analysis),
        career_goal: session.career_goal.clone(),
        roadmap: session.roadmap.as_ref().map(render_roadmap),
    }
}

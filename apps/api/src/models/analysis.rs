use serde::{Deserialize, Serialize};

use super::lenient::{self, Scalar};

/// Structured résumé analysis as returned by the model.
///
/// JSON keys are the Portuguese keys the analysis prompt asks for. Every field
/// is optional; rendering code supplies placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    #[serde(rename = "profissao_real", deserialize_with = "lenient::record")]
    pub profession: Option<Profession>,
    #[serde(rename = "nivel_senioridade", deserialize_with = "lenient::record")]
    pub seniority: Option<Seniority>,
    #[serde(rename = "lacunas", deserialize_with = "lenient::record")]
    pub gaps: Option<Gaps>,
    #[serde(rename = "proximo_cargo", deserialize_with = "lenient::record")]
    pub next_role: Option<NextRole>,
    #[serde(rename = "plano_crescimento", deserialize_with = "lenient::record")]
    pub growth_plan: Option<GrowthPlan>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profession {
    #[serde(rename = "titulo", deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(rename = "descricao", deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(rename = "nivel_confianca", deserialize_with = "lenient::text")]
    pub confidence: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Seniority {
    #[serde(rename = "nivel", deserialize_with = "lenient::text")]
    pub level: Option<String>,
    #[serde(rename = "anos_experiencia", deserialize_with = "lenient::record")]
    pub years: Option<Scalar>,
    #[serde(rename = "justificativa", deserialize_with = "lenient::text")]
    pub rationale: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Gaps {
    #[serde(rename = "tecnicas", deserialize_with = "lenient::records")]
    pub technical: Vec<TechnicalGap>,
    #[serde(rename = "comportamentais", deserialize_with = "lenient::records")]
    pub behavioral: Vec<BehavioralGap>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalGap {
    #[serde(deserialize_with = "lenient::text")]
    pub skill: Option<String>,
    #[serde(rename = "importancia", deserialize_with = "lenient::text")]
    pub importance: Option<String>,
    #[serde(rename = "como_desenvolver", deserialize_with = "lenient::text")]
    pub how_to_develop: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BehavioralGap {
    #[serde(rename = "competencia", deserialize_with = "lenient::text")]
    pub competency: Option<String>,
    #[serde(rename = "importancia", deserialize_with = "lenient::text")]
    pub importance: Option<String>,
    #[serde(rename = "como_desenvolver", deserialize_with = "lenient::text")]
    pub how_to_develop: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NextRole {
    #[serde(rename = "cargo", deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(rename = "prazo_estimado", deserialize_with = "lenient::text")]
    pub timeframe: Option<String>,
    #[serde(rename = "requisitos", deserialize_with = "lenient::text_list")]
    pub requirements: Vec<String>,
    #[serde(rename = "probabilidade", deserialize_with = "lenient::text")]
    pub probability: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthPlan {
    #[serde(rename = "objetivo", deserialize_with = "lenient::text")]
    pub objective: Option<String>,
    #[serde(rename = "prazo_total", deserialize_with = "lenient::text")]
    pub total_timeframe: Option<String>,
    #[serde(rename = "etapas", deserialize_with = "lenient::records")]
    pub phases: Vec<GrowthPhase>,
    #[serde(rename = "certificacoes_sugeridas", deserialize_with = "lenient::text_list")]
    pub certifications: Vec<String>,
    #[serde(rename = "cursos_recomendados", deserialize_with = "lenient::text_list")]
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthPhase {
    #[serde(rename = "numero", deserialize_with = "lenient::record")]
    pub number: Option<Scalar>,
    #[serde(rename = "titulo", deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(rename = "prazo", deserialize_with = "lenient::text")]
    pub timeframe: Option<String>,
    #[serde(rename = "acoes", deserialize_with = "lenient::text_list")]
    pub actions: Vec<String>,
    #[serde(rename = "recursos", deserialize_with = "lenient::text_list")]
    pub resources: Vec<String>,
    #[serde(rename = "indicadores_sucesso", deserialize_with = "lenient::text_list")]
    pub success_indicators: Vec<String>,
}

impl AnalysisResult {
    /// Technical gaps, empty when the section is absent.
    pub fn technical_gaps(&self) -> &[TechnicalGap] {
        self.gaps
            .as_ref()
            .map(|g| g.technical.as_slice())
            .unwrap_or_default()
    }

    pub fn behavioral_gaps(&self) -> &[BehavioralGap] {
        self.gaps
            .as_ref()
            .map(|g| g.behavioral.as_slice())
            .unwrap_or_default()
    }
}

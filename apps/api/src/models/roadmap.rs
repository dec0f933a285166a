use serde::{Deserialize, Serialize};

use super::lenient::{self, Scalar};

/// Phase-based plan for reaching a stated career goal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapResult {
    #[serde(rename = "objetivo_viavel", deserialize_with = "lenient::flag")]
    pub feasible: Option<bool>,
    #[serde(rename = "prazo_estimado", deserialize_with = "lenient::text")]
    pub timeframe: Option<String>,
    #[serde(rename = "nivel_desafio", deserialize_with = "lenient::text")]
    pub difficulty: Option<String>,
    #[serde(rename = "etapas", deserialize_with = "lenient::records")]
    pub phases: Vec<RoadmapPhase>,
    #[serde(rename = "cargos_intermediarios", deserialize_with = "lenient::text_list")]
    pub intermediate_roles: Vec<String>,
    #[serde(rename = "investimento_estimado", deserialize_with = "lenient::text")]
    pub estimated_investment: Option<String>,
    #[serde(rename = "probabilidade_sucesso", deserialize_with = "lenient::text")]
    pub success_probability: Option<String>,
    #[serde(rename = "fatores_criticos", deserialize_with = "lenient::text_list")]
    pub critical_factors: Vec<String>,
    #[serde(rename = "observacoes", deserialize_with = "lenient::text")]
    pub observations: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapPhase {
    #[serde(rename = "ordem", deserialize_with = "lenient::record")]
    pub order: Option<Scalar>,
    #[serde(rename = "titulo", deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(rename = "prazo", deserialize_with = "lenient::text")]
    pub timeframe: Option<String>,
    #[serde(rename = "acoes", deserialize_with = "lenient::text_list")]
    pub actions: Vec<String>,
    #[serde(rename = "skills_desenvolver", deserialize_with = "lenient::text_list")]
    pub skills_to_develop: Vec<String>,
    #[serde(rename = "recursos", deserialize_with = "lenient::text_list")]
    pub resources: Vec<String>,
    #[serde(rename = "indicadores_sucesso", deserialize_with = "lenient::text_list")]
    pub success_indicators: Vec<String>,
}

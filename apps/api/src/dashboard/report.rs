//! Plain-text career report, suitable for download or a terminal.

use crate::dashboard::cards::{or_placeholder, PLACEHOLDER};
use crate::models::AnalysisResult;

const RULE_WIDTH: usize = 80;

/// Renders the analysis as a numbered text report. Absent sections are skipped.
pub fn render_report(analysis: &AnalysisResult) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        rule.clone(),
        "RELATÓRIO DE INTELIGÊNCIA DE CARREIRA".to_string(),
        rule.clone(),
        String::new(),
    ];

    if let Some(p) = &analysis.profession {
        lines.push("1. PROFISSÃO REAL IDENTIFICADA".to_string());
        lines.push(format!("   Título: {}", or_placeholder(p.title.as_deref())));
        lines.push(format!("   Descrição: {}", or_placeholder(p.description.as_deref())));
        lines.push(format!("   Confiança: {}", or_placeholder(p.confidence.as_deref())));
        lines.push(String::new());
    }

    if let Some(s) = &analysis.seniority {
        let years = s
            .years
            .as_ref()
            .map(|y| y.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string());
        lines.push("2. NÍVEL DE SENIORIDADE".to_string());
        lines.push(format!("   Nível: {}", or_placeholder(s.level.as_deref())));
        lines.push(format!("   Anos de experiência: {years}"));
        lines.push(format!("   Justificativa: {}", or_placeholder(s.rationale.as_deref())));
        lines.push(String::new());
    }

    if analysis.gaps.is_some() {
        lines.push("3. LACUNAS IDENTIFICADAS".to_string());
        lines.push(String::new());
        lines.push("   Lacunas Técnicas:".to_string());
        for gap in analysis.technical_gaps() {
            push_gap(
                &mut lines,
                gap.skill.as_deref(),
                gap.importance.as_deref(),
                gap.how_to_develop.as_deref(),
            );
        }
        lines.push(String::new());
        lines.push("   Lacunas Comportamentais:".to_string());
        for gap in analysis.behavioral_gaps() {
            push_gap(
                &mut lines,
                gap.competency.as_deref(),
                gap.importance.as_deref(),
                gap.how_to_develop.as_deref(),
            );
        }
        lines.push(String::new());
    }

    if let Some(r) = &analysis.next_role {
        lines.push("4. PRÓXIMO CARGO PROVÁVEL".to_string());
        lines.push(format!("   Cargo: {}", or_placeholder(r.title.as_deref())));
        lines.push(format!("   Prazo estimado: {}", or_placeholder(r.timeframe.as_deref())));
        lines.push(format!("   Probabilidade: {}", or_placeholder(r.probability.as_deref())));
        lines.push("   Requisitos:".to_string());
        lines.extend(r.requirements.iter().map(|req| format!("   • {req}")));
        lines.push(String::new());
    }

    if let Some(plan) = &analysis.growth_plan {
        lines.push("5. PLANO PRÁTICO DE CRESCIMENTO".to_string());
        lines.push(format!("   Objetivo: {}", or_placeholder(plan.objective.as_deref())));
        lines.push(format!(
            "   Prazo total: {}",
            or_placeholder(plan.total_timeframe.as_deref())
        ));
        lines.push(String::new());
        lines.push("   Etapas:".to_string());
        for phase in &plan.phases {
            let number = phase
                .number
                .as_ref()
                .map(|n| n.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string());
            lines.push(format!(
                "   Etapa {number}: {} ({})",
                or_placeholder(phase.title.as_deref()),
                or_placeholder(phase.timeframe.as_deref())
            ));
            lines.push("   Ações:".to_string());
            lines.extend(phase.actions.iter().map(|a| format!("     • {a}")));
            lines.push(String::new());
        }

        if !plan.certifications.is_empty() {
            lines.push("   Certificações Sugeridas:".to_string());
            lines.extend(plan.certifications.iter().map(|c| format!("   • {c}")));
            lines.push(String::new());
        }

        if !plan.courses.is_empty() {
            lines.push("   Cursos Recomendados:".to_string());
            lines.extend(plan.courses.iter().map(|c| format!("   • {c}")));
        }
    }

    lines.push(String::new());
    lines.push(rule);
    lines.join("\n")
}

fn push_gap(
    lines: &mut Vec<String>,
    name: Option<&str>,
    importance: Option<&str>,
    how_to_develop: Option<&str>,
) {
    lines.push(format!(
        "   • {} (Importância: {})",
        or_placeholder(name),
        or_placeholder(importance)
    ));
    lines.push(format!("     Como desenvolver: {}", or_placeholder(how_to_develop)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_includes_present_sections_only() {
        let analysis: AnalysisResult = serde_json::from_str(
            r#"{
                "nivel_senioridade": {"nivel": "Sênior", "anos_experiencia": 7},
                "proximo_cargo": {"cargo": "Tech Lead", "requisitos": ["Mentoria", "Arquitetura"]}
            }"#,
        )
        .unwrap();

        let report = render_report(&analysis);

        assert!(report.contains("2. NÍVEL DE SENIORIDADE"));
        assert!(report.contains("   Nível: Sênior"));
        assert!(report.contains("   Anos de experiência: 7"));
        assert!(report.contains("   Justificativa: N/A"));
        assert!(report.contains("   • Arquitetura"));
        assert!(!report.contains("1. PROFISSÃO REAL"));
        assert!(!report.contains("5. PLANO PRÁTICO"));
    }

    #[test]
    fn test_report_lists_plan_phases() {
        let analysis: AnalysisResult = serde_json::from_str(
            r#"{"plano_crescimento": {
                "objetivo": "Liderar time",
                "etapas": [{"numero": 1, "titulo": "Base", "prazo": "3 meses", "acoes": ["Ler DDIA"]}],
                "cursos_recomendados": ["Liderança 101"]
            }}"#,
        )
        .unwrap();

        let report = render_report(&analysis);

        assert!(report.contains("   Etapa 1: Base (3 meses)"));
        assert!(report.contains("     • Ler DDIA"));
        assert!(report.contains("   Cursos Recomendados:"));
        assert!(!report.contains("Certificações Sugeridas"));
    }

    #[test]
    fn test_empty_analysis_is_just_the_frame() {
        let report = render_report(&AnalysisResult::default());
        assert!(report.starts_with(&"=".repeat(RULE_WIDTH)));
        assert!(report.ends_with(&"=".repeat(RULE_WIDTH)));
        assert!(!report.contains("1."));
    }

    #[test]
    fn test_sections_are_separated_by_blank_lines() {
        let analysis: AnalysisResult = serde_json::from_str(
            r#"{"profissao_real": {"titulo": "Dev"}, "lacunas": {"tecnicas": [{"skill": "Go"}]}}"#,
        )
        .unwrap();

        let report = render_report(&analysis);

        assert!(report.contains("   Confiança: N/A\n\n3. LACUNAS IDENTIFICADAS\n\n   Lacunas Técnicas:\n"));
        assert!(report.contains("   • Go (Importância: N/A)\n     Como desenvolver: N/A\n"));
        assert!(report.ends_with(&format!("\n\n{}", "=".repeat(RULE_WIDTH))));
    }
}

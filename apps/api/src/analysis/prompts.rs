// Résumé analysis prompt. Replace `{resume_text}` before sending.
// The JSON example fixes the Portuguese keys `AnalysisResult` reads.

use crate::llm_client::template::fill_template;

pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analise este currículo de forma profissional e retorne um JSON estruturado.

Identifique:
- A profissão real, com base nas experiências e responsabilidades descritas
- O nível de senioridade atual
- Lacunas técnicas e comportamentais
- O próximo cargo lógico na carreira
- Um plano de desenvolvimento profissional

CURRÍCULO:
{resume_text}

Retorne APENAS o JSON, sem markdown e sem texto adicional:
{
    "profissao_real": {"titulo": "título claro", "descricao": "descrição prática", "nivel_confianca": "alto/médio/baixo"},
    "nivel_senioridade": {"nivel": "Júnior/Pleno/Sênior/Especialista", "anos_experiencia": número, "justificativa": "análise detalhada"},
    "lacunas": {
        "tecnicas": [{"skill": "skill específica", "importancia": "alta/média/baixa", "como_desenvolver": "ação prática"}],
        "comportamentais": [{"competencia": "competência clara", "importancia": "alta/média/baixa", "como_desenvolver": "conselho prático"}]
    },
    "proximo_cargo": {"cargo": "título realista", "prazo_estimado": "prazo", "requisitos": ["requisito claro"], "probabilidade": "alta/média/baixa"},
    "plano_crescimento": {
        "objetivo": "objetivo ambicioso porém alcançável",
        "prazo_total": "prazo realista",
        "etapas": [{"numero": 1, "titulo": "fase clara", "prazo": "tempo", "acoes": ["ação específica"], "recursos": ["recurso útil"], "indicadores_sucesso": ["métrica clara"]}],
        "certificacoes_sugeridas": ["certificação relevante"],
        "cursos_recomendados": ["curso específico"]
    }
}"#;

pub fn build_analysis_prompt(resume_text: &str) -> String {
    fill_template(ANALYSIS_PROMPT_TEMPLATE, &[("{resume_text}", resume_text)])
}

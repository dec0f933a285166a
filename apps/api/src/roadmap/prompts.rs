// Career roadmap prompt. Replace `{resume_text}` and `{career_goal}` before sending.

use crate::llm_client::template::fill_template;

/// Only the head of the résumé goes into the roadmap prompt.
pub const ROADMAP_RESUME_CHARS: usize = 3_000;

pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"Você é um consultor executivo de carreira experiente, especializado em transições profissionais e desenvolvimento de liderança.

TAREFA:
Avalie se o profissional abaixo consegue chegar ao objetivo de carreira informado e monte um roadmap estratégico, realista e acionável.

CURRÍCULO DO PROFISSIONAL:
{resume_text}

OBJETIVO DE CARREIRA: {career_goal}

DIRETRIZES:
1. Seja honesto sobre a viabilidade considerando o perfil atual
2. Use prazos realistas, baseados em transições reais de mercado
3. Priorize ações de alto impacto que acelerem a transição
4. Sugira certificações e cursos reconhecidos pelo mercado
5. Inclua as soft skills críticas para o cargo alvo
6. Considere networking estratégico e visibilidade profissional
7. Aponte cargos intermediários quando necessário

Retorne APENAS JSON válido (sem markdown, sem comentários):
{
    "objetivo_viavel": true,
    "prazo_estimado": "18-24 meses",
    "nivel_desafio": "médio",
    "etapas": [
        {
            "ordem": 1,
            "titulo": "Fundação Técnica e Posicionamento",
            "prazo": "4-6 meses",
            "acoes": [
                "Concluir certificação X reconhecida no mercado",
                "Desenvolver projeto demonstrativo em Y",
                "Iniciar networking com profissionais da área"
            ],
            "skills_desenvolver": [
                "Skill técnica específica",
                "Soft skill relevante"
            ],
            "recursos": [
                "Certificação profissional (ex: AWS, Azure, PMP)",
                "Curso estruturado de plataforma respeitada"
            ],
            "indicadores_sucesso": [
                "Certificação obtida",
                "Portfólio com 3+ projetos relevantes"
            ]
        }
    ],
    "cargos_intermediarios": ["Cargo de transição 1", "Cargo de transição 2"],
    "investimento_estimado": "R$ X.XXX em cursos, certificações e networking",
    "probabilidade_sucesso": "alta",
    "fatores_criticos": [
        "Dedicação de X horas semanais",
        "Networking ativo e consistente"
    ],
    "observacoes": "Análise considerando tendências de mercado, demanda pelo perfil, competitividade, melhor momento para a transição e desafios prováveis."
}"#;

/// First `ROADMAP_RESUME_CHARS` characters, cut on a char boundary.
pub fn truncate_resume(resume_text: &str) -> &str {
    match resume_text.char_indices().nth(ROADMAP_RESUME_CHARS) {
        Some((byte_idx, _)) => &resume_text[..byte_idx],
        None => resume_text,
    }
}

pub fn build_roadmap_prompt(resume_text: &str, career_goal: &str) -> String {
    fill_template(
        ROADMAP_PROMPT_TEMPLATE,
        &[
            ("{resume_text}", truncate_resume(resume_text)),
            ("{career_goal}", career_goal),
        ],
    )
}

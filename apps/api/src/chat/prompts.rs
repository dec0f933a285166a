// Career Q&A prompt. `{context_block}` is empty when no analysis is available.

use crate::llm_client::template::fill_template;

pub const CHAT_PROMPT_TEMPLATE: &str = "Consultor de carreira sênior especializado em tecnologia.

Orientações:
- Respostas objetivas e diretas
- Foco em desenvolvimento profissional e técnico
- Análise baseada em dados e experiência de mercado

{context_block}

Pergunta: {message}

Resposta:";

pub fn build_chat_prompt(message: &str, context: Option<&str>) -> String {
    let context_block = context
        .filter(|c| !c.trim().is_empty())
        .map(|c| format!("Contexto: {c}"))
        .unwrap_or_default();

    fill_template(
        CHAT_PROMPT_TEMPLATE,
        &[("{context_block}", context_block.as_str()), ("{message}", message)],
    )
}

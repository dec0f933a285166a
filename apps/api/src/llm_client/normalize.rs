//! Normalization of model replies that should be JSON but often arrive
//! wrapped in markdown fences.
//!
//! Fence stripping is a best-effort pre-filter; parsing is strict. The two
//! steps stay separate so each can be exercised on its own.

use serde::de::DeserializeOwned;

use super::LlmError;

/// Number of characters of the offending text kept for diagnostics.
const DIAGNOSTIC_PREFIX_CHARS: usize = 200;

/// Strips ```json ... ``` or ``` ... ``` wrapping from a model reply.
///
/// When the reply opens with a fence and has more than two lines, the first and
/// last lines are dropped as fence delimiters. Any fence tokens left over are
/// then removed. A two-line reply skips the line drop and relies on the token
/// removal alone.
pub fn strip_code_fences(text: &str) -> String {
    let text = text.trim();

    let unwrapped = if text.starts_with("```") {
        let lines: Vec<&str> = text.split('\n').collect();
        if lines.len() > 2 {
            lines[1..lines.len() - 1].join("\n")
        } else {
            text.to_string()
        }
    } else {
        text.to_string()
    };

    unwrapped
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parses already-stripped model text as JSON.
pub fn parse_model_json<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    serde_json::from_str(text).map_err(|source| LlmError::MalformedOutput {
        source,
        prefix: diagnostic_prefix(text),
    })
}

/// Strip then parse. The usual entry point for structured replies.
pub fn normalize_json<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    parse_model_json(&strip_code_fences(text))
}

fn diagnostic_prefix(text: &str) -> String {
    text.chars().take(DIAGNOSTIC_PREFIX_CHARS).collect()
}

//! Tolerant building blocks for deserializing model output.
//!
//! The model is asked for a JSON shape but nothing enforces it: keys go
//! missing, `null` shows up where a list was expected, numbers arrive as
//! strings and strings arrive as numbers. Each helper reads the raw value and
//! keeps what it can; a wrong-typed field becomes absent instead of failing
//! the whole record.

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A number-ish value the model may emit as a number, a string or a boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
    Flag(bool),
}

impl Scalar {
    /// Integer view, parsing text such as `"3"` when needed.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Number(n) => n.as_i64(),
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Flag(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => write!(f, "{s}"),
            Scalar::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Display text. Numbers and booleans are rendered as written; arrays,
/// objects and `null` become absent.
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_text(Value::deserialize(deserializer)?))
}

/// List of display strings. A lone scalar counts as a one-item list;
/// items that are not scalars are dropped.
pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(value_text).collect(),
        other => value_text(other).into_iter().collect(),
    })
}

/// Nested section or scalar. Anything that does not fit `T` becomes `None`.
pub fn record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// List of nested records. Items that do not fit `T` are dropped; a lone
/// object counts as a one-item list.
pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        item @ Value::Object(_) => serde_json::from_value(item).ok().into_iter().collect(),
        _ => Vec::new(),
    })
}

/// Yes/no answer given as a boolean, a number or a Portuguese/English word.
/// Unrecognized answers become `None`.
pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "sim" | "true" | "yes" | "verdadeiro" | "viável" | "viavel" => Some(true),
            "não" | "nao" | "false" | "no" | "falso" | "inviável" | "inviavel" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn value_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Holder {
        #[serde(deserialize_with = "text")]
        label: Option<String>,
        #[serde(deserialize_with = "text_list")]
        items: Vec<String>,
        #[serde(deserialize_with = "record")]
        value: Option<Scalar>,
        #[serde(deserialize_with = "records")]
        children: Vec<Child>,
        #[serde(deserialize_with = "flag")]
        ok: Option<bool>,
    }

    #[derive(Debug, Deserialize)]
    struct Child {
        name: String,
    }

    fn holder(json: &str) -> Holder {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_missing_and_null_fields_default() {
        let h = holder(r#"{"label": null, "items": null, "value": null, "children": null}"#);
        assert!(h.label.is_none());
        assert!(h.items.is_empty());
        assert!(h.value.is_none());
        assert!(h.children.is_empty());
        assert!(holder("{}").ok.is_none());
    }

    #[test]
    fn test_text_accepts_numbers() {
        assert_eq!(holder(r#"{"label": 0.85}"#).label.as_deref(), Some("0.85"));
        assert_eq!(holder(r#"{"label": "alto"}"#).label.as_deref(), Some("alto"));
        assert!(holder(r#"{"label": {"x": 1}}"#).label.is_none());
    }

    #[test]
    fn test_text_list_tolerates_lone_string_and_mixed_items() {
        assert_eq!(holder(r#"{"items": "Liderança"}"#).items, vec!["Liderança"]);
        assert_eq!(
            holder(r#"{"items": ["a", 2, null, {"b": 1}]}"#).items,
            vec!["a", "2"]
        );
    }

    #[test]
    fn test_scalar_accepts_number_and_text() {
        let n = holder(r#"{"value": 7}"#).value.unwrap();
        let t = holder(r#"{"value": "7"}"#).value.unwrap();
        assert_eq!(n.to_string(), "7");
        assert_eq!(t.to_string(), "7");
        assert_eq!(t.as_i64(), Some(7));
        assert!(holder(r#"{"value": [7]}"#).value.is_none());
    }

    #[test]
    fn test_scalar_fractional_display() {
        assert_eq!(holder(r#"{"value": 3.5}"#).value.unwrap().to_string(), "3.5");
    }

    #[test]
    fn test_records_drop_misfits() {
        let h = holder(r#"{"children": [{"name": "a"}, "b", {"other": 1}]}"#);
        assert_eq!(h.children.len(), 1);
        assert_eq!(h.children[0].name, "a");
        assert_eq!(holder(r#"{"children": {"name": "solo"}}"#).children.len(), 1);
        assert!(holder(r#"{"children": "x"}"#).children.is_empty());
    }

    #[test]
    fn test_flag_words() {
        assert_eq!(holder(r#"{"ok": "sim"}"#).ok, Some(true));
        assert_eq!(holder(r#"{"ok": "Não"}"#).ok, Some(false));
        assert_eq!(holder(r#"{"ok": 0}"#).ok, Some(false));
        assert_eq!(holder(r#"{"ok": true}"#).ok, Some(true));
        assert!(holder(r#"{"ok": "talvez"}"#).ok.is_none());
    }
}

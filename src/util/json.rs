//! Helpers for pulling JSON out of model replies.

/// Strip markdown code fences from a JSON reply.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let without_opening = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_opening
        .strip_suffix("```")
        .unwrap_or(without_opening)
        .trim()
}

/// Find the span from the first `{` to the last `}` in free text.
///
/// Models asked for "only JSON" still tend to wrap it in a sentence or two.
/// The returned slice is not guaranteed to be valid JSON.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_code_fences_plain_json() {
        assert_eq!(strip_code_fences(r#"{"key": "value"}"#), r#"{"key": "value"}"#);
    }

    #[test]
    fn strip_code_fences_with_json_fence() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), r#"{"key": "value"}"#);
    }

    #[test]
    fn strip_code_fences_with_bare_fence() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), r#"{"key": "value"}"#);
    }

    #[test]
    fn extract_json_object_from_surrounding_prose() {
        let text = r#"Excelente, aquí tienes el resumen:

        {
          "ubicacion": "Santiago",
          "habitaciones": 4
        }

        ¿Deseas ajustar algo?"#;
        let json = extract_json_object(text).unwrap();
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(value["ubicacion"], "Santiago");
        assert_eq!(value["habitaciones"], 4);
    }

    #[test]
    fn extract_json_object_without_braces() {
        assert_eq!(extract_json_object("no hay datos"), None);
        assert_eq!(extract_json_object("} al revés {"), None);
    }
}

//! Parse model output into schema-shaped field values
//!
//! Providers often wrap valid JSON in markdown fencing despite being told
//! not to, so free-text output goes through [`strip_code_fences`] before
//! JSON parsing. The schema is authoritative for shape: missing fields
//! are filled with null, extraneous fields are dropped.

use crate::error::ExtractError;
use crate::types::{ExtractionResult, FieldValue};
use docfields_domain::DynamicSchema;
use serde_json::Value;
use tracing::debug;

/// Strip surrounding markdown code-fence markup from a response.
///
/// Handles a language-tagged opening fence (```` ```json ````), an
/// untagged fence, prose before/after the fenced block, and input with no
/// fencing at all (returned trimmed and otherwise unchanged).
pub fn strip_code_fences(response: &str) -> String {
    let trimmed = response.trim();

    let Some(open) = trimmed.find("```") else {
        return trimmed.to_string();
    };

    let after_open = &trimmed[open + 3..];
    // The opening fence line may carry a language tag; content starts on
    // the next line (or, for single-line fences, right after the tag).
    let body = match after_open.find('\n') {
        Some(newline) => &after_open[newline + 1..],
        None => after_open.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };

    match body.rfind("```") {
        Some(close) => body[..close].trim().to_string(),
        None => body.trim().to_string(),
    }
}

/// Parse a model response into a JSON object.
///
/// `strip_fences` is set for free-text backends; native-structured output
/// is parsed as-is.
pub fn parse_model_output(
    response: &str,
    strip_fences: bool,
) -> Result<serde_json::Map<String, Value>, ExtractError> {
    let json_str = if strip_fences {
        strip_code_fences(response)
    } else {
        response.trim().to_string()
    };

    let value: Value = serde_json::from_str(&json_str)
        .map_err(|e| ExtractError::MalformedOutput(format!("JSON parse error: {}", e)))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ExtractError::MalformedOutput(format!(
            "expected JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Conform a parsed object to the schema.
///
/// The output's key set equals exactly the schema's identifiers, in
/// schema order: absent fields become null, extraneous fields are
/// dropped, non-string scalars are coerced to their string rendering.
pub fn conform(schema: &DynamicSchema, map: &serde_json::Map<String, Value>) -> ExtractionResult {
    for key in map.keys() {
        if !schema.contains(key) {
            debug!("dropping field '{}' not present in schema", key);
        }
    }

    let values = schema
        .idents()
        .map(|ident| FieldValue {
            ident: ident.to_string(),
            value: map.get(ident).and_then(coerce_to_string),
        })
        .collect();

    ExtractionResult::from_values(values)
}

fn coerce_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExtractionStatus;

    #[test]
    fn test_strip_json_tagged_fence() {
        let input = "```json\n{\"a\": \"b\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"a\": \"b\"}");
    }

    #[test]
    fn test_strip_untagged_fence() {
        let input = "```\n{\"a\": \"b\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"a\": \"b\"}");
    }

    #[test]
    fn test_no_fence_passes_through() {
        let input = "{\"a\": \"b\"}";
        assert_eq!(strip_code_fences(input), "{\"a\": \"b\"}");
    }

    #[test]
    fn test_unclosed_fence_takes_remainder() {
        let input = "```json\n{\"a\": \"b\"}";
        assert_eq!(strip_code_fences(input), "{\"a\": \"b\"}");
    }

    #[test]
    fn test_prose_around_fence_is_dropped() {
        let input = "Here is the result:\n```json\n{\"a\": \"b\"}\n```\nHope this helps!";
        assert_eq!(strip_code_fences(input), "{\"a\": \"b\"}");
    }

    #[test]
    fn test_single_backticks_inside_values_survive() {
        let input = "```json\n{\"a\": \"uses `code` style\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"a\": \"uses `code` style\"}");
    }

    #[test]
    fn test_parse_valid_object() {
        let map = parse_model_output(r#"{"email": "a@b.com"}"#, true).unwrap();
        assert_eq!(map["email"], "a@b.com");
    }

    #[test]
    fn test_parse_fenced_object() {
        let map = parse_model_output("```json\n{\"email\": null}\n```", true).unwrap();
        assert!(map["email"].is_null());
    }

    #[test]
    fn test_parse_refusal_is_malformed() {
        let result = parse_model_output("Sorry, I cannot comply.", true);
        assert!(matches!(result, Err(ExtractError::MalformedOutput(_))));
    }

    #[test]
    fn test_parse_array_is_malformed() {
        let result = parse_model_output(r#"["a", "b"]"#, true);
        match result {
            Err(ExtractError::MalformedOutput(msg)) => assert!(msg.contains("array")),
            other => panic!("expected MalformedOutput, got {:?}", other),
        }
    }

    #[test]
    fn test_conform_fills_missing_with_null() {
        let schema = DynamicSchema::build(["Full Name", "phone_number", "email"]);
        let map = serde_json::from_str(r#"{"Full_Name": "John Doe"}"#).unwrap();

        let result = conform(&schema, &map);
        assert_eq!(result.get("Full_Name").unwrap().as_deref(), Some("John Doe"));
        assert_eq!(result.get("phone_number"), Some(&None));
        assert_eq!(result.get("email"), Some(&None));
        assert_eq!(result.status(), ExtractionStatus::Partial);
    }

    #[test]
    fn test_conform_drops_extraneous_fields() {
        let schema = DynamicSchema::build(["email"]);
        let map =
            serde_json::from_str(r#"{"email": "a@b.com", "confidence": "high", "notes": "x"}"#)
                .unwrap();

        let result = conform(&schema, &map);
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("email").unwrap().as_deref(), Some("a@b.com"));
        assert_eq!(result.get("confidence"), None);
    }

    #[test]
    fn test_conform_key_set_equals_schema() {
        let schema = DynamicSchema::build(["a", "b", "c"]);
        let map = serde_json::from_str(r#"{"b": "2", "z": "9"}"#).unwrap();

        let result = conform(&schema, &map);
        let idents: Vec<_> = result.iter().map(|v| v.ident.as_str()).collect();
        assert_eq!(idents, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_conform_coerces_scalars_to_strings() {
        let schema = DynamicSchema::build(["age", "active"]);
        let map = serde_json::from_str(r#"{"age": 42, "active": true}"#).unwrap();

        let result = conform(&schema, &map);
        assert_eq!(result.get("age").unwrap().as_deref(), Some("42"));
        assert_eq!(result.get("active").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_conform_preserves_explicit_null() {
        let schema = DynamicSchema::build(["email"]);
        let map = serde_json::from_str(r#"{"email": null}"#).unwrap();

        let result = conform(&schema, &map);
        assert_eq!(result.get("email"), Some(&None));
    }

    #[test]
    fn test_conform_all_present_is_success() {
        let schema = DynamicSchema::build(["a", "b"]);
        let map = serde_json::from_str(r#"{"a": "1", "b": "2"}"#).unwrap();

        let result = conform(&schema, &map);
        assert_eq!(result.status(), ExtractionStatus::Success);
    }
}

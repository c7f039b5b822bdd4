//! Runtime-built field schemas
//!
//! A [`DynamicSchema`] is constructed once per extraction request from
//! user-supplied field names. It drives both prompt construction and
//! null-tolerant result validation; it performs no content validation of
//! its own (every field is "string, nullable" and nothing more).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A single extractable field: a normalized identifier plus the
/// human-readable description used in prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Normalized identifier (trimmed, whitespace replaced with `_`)
    pub ident: String,

    /// Human-readable description, e.g. "The email of the person"
    pub description: String,
}

/// An ordered set of [`FieldSpec`]s built from runtime input.
///
/// Construction policy: identifiers keep first-seen order; when two input
/// names normalize to the same identifier, the later description overwrites
/// the earlier one. Names that normalize to empty are dropped.
///
/// Immutable after construction.
///
/// # Examples
///
/// ```
/// use docfields_domain::DynamicSchema;
///
/// let schema = DynamicSchema::build(["  Full Name ", "phone_number", ""]);
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.idents().collect::<Vec<_>>(), vec!["Full_Name", "phone_number"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicSchema {
    fields: Vec<FieldSpec>,
}

impl DynamicSchema {
    /// Build a schema from raw field names.
    ///
    /// Input may contain duplicates, surrounding whitespace, or empty
    /// strings; all are handled per the construction policy above.
    pub fn build<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields: Vec<FieldSpec> = Vec::new();

        for name in names {
            let trimmed = name.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }

            let ident: String = trimmed
                .chars()
                .map(|c| if c.is_whitespace() { '_' } else { c })
                .collect();
            let description = format!("The {} of the person", trimmed);

            match fields.iter_mut().find(|f| f.ident == ident) {
                Some(existing) => existing.description = description,
                None => fields.push(FieldSpec { ident, description }),
            }
        }

        Self { fields }
    }

    /// Number of fields in the schema.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over the field specs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    /// Iterate over the normalized identifiers in schema order.
    pub fn idents(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.ident.as_str())
    }

    /// True if `ident` names a field in this schema.
    pub fn contains(&self, ident: &str) -> bool {
        self.fields.iter().any(|f| f.ident == ident)
    }

    /// Render the schema as a JSON Schema object.
    ///
    /// Every property is `["string", "null"]`, every property is required,
    /// and additional properties are rejected. This is the shape consumed
    /// by native structured-output backends and embedded in free-text
    /// format instructions.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = serde_json::Map::new();
        for field in &self.fields {
            properties.insert(
                field.ident.clone(),
                json!({
                    "type": ["string", "null"],
                    "description": field.description,
                }),
            );
        }

        let required: Vec<&str> = self.idents().collect();

        json!({
            "title": "DynamicOutput",
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }

    /// Render formatting instructions for free-text backends.
    ///
    /// Backends without native structured output receive these in the
    /// system prompt so the completion can be parsed as JSON.
    pub fn format_instructions(&self) -> String {
        let schema = serde_json::to_string_pretty(&self.to_json_schema())
            .unwrap_or_else(|_| "{}".to_string());

        format!(
            "The output must be a JSON object conforming to the JSON schema below.\n\
             Every value is a string, or null when the field is not found.\n\n\
             {}",
            schema
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_normalizes_whitespace() {
        let schema = DynamicSchema::build(["Full Name"]);
        assert_eq!(schema.idents().collect::<Vec<_>>(), vec!["Full_Name"]);
    }

    #[test]
    fn test_build_trims_surrounding_whitespace() {
        let schema = DynamicSchema::build(["  email  "]);
        assert_eq!(schema.idents().collect::<Vec<_>>(), vec!["email"]);
    }

    #[test]
    fn test_build_drops_empty_names() {
        let schema = DynamicSchema::build(["", "   ", "phone"]);
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.idents().collect::<Vec<_>>(), vec!["phone"]);
    }

    #[test]
    fn test_build_all_whitespace_yields_empty_schema() {
        let schema = DynamicSchema::build(["", "  ", "\t"]);
        assert!(schema.is_empty());
    }

    #[test]
    fn test_build_empty_input_yields_empty_schema() {
        let schema = DynamicSchema::build(Vec::<String>::new());
        assert!(schema.is_empty());
    }

    #[test]
    fn test_duplicates_keep_first_seen_order() {
        let schema = DynamicSchema::build(["Name", "email", " Name "]);
        assert_eq!(schema.len(), 2);

        let idents: Vec<_> = schema.idents().collect();
        assert_eq!(idents, vec!["Name", "email"]);
    }

    #[test]
    fn test_colliding_idents_take_last_description() {
        // "Full Name" and "Full\tName" normalize to the same identifier
        // but carry different raw spellings.
        let schema = DynamicSchema::build(["Full Name", "email", "Full\tName"]);
        assert_eq!(schema.len(), 2);

        let first = schema.iter().next().unwrap();
        assert_eq!(first.ident, "Full_Name");
        assert_eq!(first.description, "The Full\tName of the person");
    }

    #[test]
    fn test_internal_whitespace_each_char_replaced() {
        let schema = DynamicSchema::build(["a  b"]);
        assert_eq!(schema.idents().collect::<Vec<_>>(), vec!["a__b"]);
    }

    #[test]
    fn test_contains() {
        let schema = DynamicSchema::build(["Full Name"]);
        assert!(schema.contains("Full_Name"));
        assert!(!schema.contains("Full Name"));
        assert!(!schema.contains("email"));
    }

    #[test]
    fn test_json_schema_shape() {
        let schema = DynamicSchema::build(["Full Name", "email"]);
        let js = schema.to_json_schema();

        assert_eq!(js["type"], "object");
        assert_eq!(js["additionalProperties"], false);
        assert_eq!(js["required"], json!(["Full_Name", "email"]));
        assert_eq!(js["properties"]["Full_Name"]["type"], json!(["string", "null"]));
        assert_eq!(
            js["properties"]["email"]["description"],
            "The email of the person"
        );
    }

    #[test]
    fn test_format_instructions_embed_schema() {
        let schema = DynamicSchema::build(["email"]);
        let instructions = schema.format_instructions();
        assert!(instructions.contains("JSON schema"));
        assert!(instructions.contains("\"email\""));
        assert!(instructions.contains("null"));
    }

    #[test]
    fn test_description_uses_trimmed_name() {
        let schema = DynamicSchema::build(["  Full Name "]);
        let field = schema.iter().next().unwrap();
        assert_eq!(field.description, "The Full Name of the person");
    }
}

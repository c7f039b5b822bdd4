//! Result types for field extraction

use docfields_domain::DynamicSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome classification of one extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    /// Every schema field resolved to a value
    Success,
    /// Model output parsed, but at least one field is null
    Partial,
    /// Model output was malformed; every field substituted with null
    FallbackEmpty,
}

/// One extracted field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    /// Normalized field identifier
    pub ident: String,
    /// Extracted value, or None when the field was not found
    pub value: Option<String>,
}

/// The terminal artifact of an extraction: one value (or null) per schema
/// field, in schema order. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    values: Vec<FieldValue>,
    status: ExtractionStatus,
}

impl ExtractionResult {
    /// Build a result from per-field values, deriving the status.
    ///
    /// Callers guarantee `values` covers exactly the schema's identifiers;
    /// the parser's conform step is the only production caller.
    pub(crate) fn from_values(values: Vec<FieldValue>) -> Self {
        let status = if values.iter().all(|v| v.value.is_some()) {
            ExtractionStatus::Success
        } else {
            ExtractionStatus::Partial
        };
        Self { values, status }
    }

    /// The all-null result substituted when model output is malformed.
    pub fn fallback_empty(schema: &DynamicSchema) -> Self {
        Self {
            values: schema
                .idents()
                .map(|ident| FieldValue {
                    ident: ident.to_string(),
                    value: None,
                })
                .collect(),
            status: ExtractionStatus::FallbackEmpty,
        }
    }

    /// Extraction status.
    pub fn status(&self) -> ExtractionStatus {
        self.status
    }

    /// Look up a field's value by identifier.
    ///
    /// Outer `None` means the identifier is not in the result at all;
    /// inner `None` means the field was not found in the document.
    pub fn get(&self, ident: &str) -> Option<&Option<String>> {
        self.values
            .iter()
            .find(|v| v.ident == ident)
            .map(|v| &v.value)
    }

    /// Iterate over values in schema order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldValue> {
        self.values.iter()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the result carries no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render as a JSON object, null for missing fields.
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        for field in &self.values {
            let value = match &field.value {
                Some(s) => Value::String(s.clone()),
                None => Value::Null,
            };
            map.insert(field.ident.clone(), value);
        }
        Value::Object(map)
    }

    /// Render as pretty-printed JSON (2-space indentation).
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.to_json()).unwrap_or_else(|_| "{}".to_string())
    }
}

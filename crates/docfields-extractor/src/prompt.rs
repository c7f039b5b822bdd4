//! Prompt construction for field extraction

use docfields_domain::{DynamicSchema, OutputMode};

/// Builds the system prompt and user message for one extraction request
pub struct PromptBuilder<'a> {
    schema: &'a DynamicSchema,
}

impl<'a> PromptBuilder<'a> {
    /// Create a prompt builder for a schema
    pub fn new(schema: &'a DynamicSchema) -> Self {
        Self { schema }
    }

    /// Render the system prompt.
    ///
    /// Free-text backends additionally receive the schema-derived format
    /// instructions and the JSON-only directive; native-structured
    /// backends get their shape from the bound schema instead.
    pub fn system_prompt(&self, mode: OutputMode) -> String {
        let fields_list = self.schema.idents().collect::<Vec<_>>().join(", ");

        let mut prompt = format!(
            "{}\nExtract the following fields from the provided text: {}.\n{}",
            SYSTEM_INSTRUCTIONS, fields_list, NULL_RULE
        );

        if mode == OutputMode::FreeText {
            prompt.push_str("\n\n");
            prompt.push_str(&self.schema.format_instructions());
            prompt.push_str("\n\n");
            prompt.push_str(OUTPUT_FORMAT_REMINDER);
        }

        prompt
    }

    /// Render the user message embedding the document text verbatim.
    pub fn user_message(&self, text: &str) -> String {
        format!("Extract info from this text:\n\n{}", text)
    }
}

const SYSTEM_INSTRUCTIONS: &str = "You are an expert at extracting information from documents.";

const NULL_RULE: &str = "If a field is not found, set it to null.";

const OUTPUT_FORMAT_REMINDER: &str = "Rules:\n\
    - If a field is not found, set it to null.\n\
    - Return ONLY valid JSON, no markdown code blocks, no explanations.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_lists_identifiers() {
        let schema = DynamicSchema::build(["Full Name", "phone_number"]);
        let builder = PromptBuilder::new(&schema);

        let prompt = builder.system_prompt(OutputMode::NativeStructured);
        assert!(prompt.contains("Full_Name, phone_number"));
        assert!(prompt.contains("set it to null"));
    }

    #[test]
    fn test_native_prompt_has_no_format_instructions() {
        let schema = DynamicSchema::build(["email"]);
        let builder = PromptBuilder::new(&schema);

        let prompt = builder.system_prompt(OutputMode::NativeStructured);
        assert!(!prompt.contains("Return ONLY valid JSON"));
        assert!(!prompt.contains("JSON schema"));
    }

    #[test]
    fn test_free_text_prompt_appends_format_instructions() {
        let schema = DynamicSchema::build(["email"]);
        let builder = PromptBuilder::new(&schema);

        let prompt = builder.system_prompt(OutputMode::FreeText);
        assert!(prompt.contains("JSON schema"));
        assert!(prompt.contains("\"email\""));
        assert!(prompt.contains("Return ONLY valid JSON"));
    }

    #[test]
    fn test_user_message_embeds_text_verbatim() {
        let schema = DynamicSchema::build(["email"]);
        let builder = PromptBuilder::new(&schema);

        let message = builder.user_message("John Doe, call me at +1-555-0100");
        assert!(message.starts_with("Extract info from this text:"));
        assert!(message.ends_with("John Doe, call me at +1-555-0100"));
    }

    #[test]
    fn test_empty_document_text_still_renders() {
        let schema = DynamicSchema::build(["email"]);
        let builder = PromptBuilder::new(&schema);

        let message = builder.user_message("");
        assert_eq!(message, "Extract info from this text:\n\n");
    }
}

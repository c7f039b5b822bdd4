//! Core extraction orchestrator

use crate::config::ExtractorConfig;
use crate::error::ExtractError;
use crate::parser;
use crate::prompt::PromptBuilder;
use crate::types::ExtractionResult;
use docfields_domain::{ChatBackend, DynamicSchema, ExtractedDocument, OutputMode};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Orchestrates one extraction: prompt rendering, a single backend call,
/// parsing per the backend's output mode, and schema validation.
pub struct FieldExtractor<B>
where
    B: ChatBackend,
{
    backend: B,
    config: ExtractorConfig,
}

impl<B> FieldExtractor<B>
where
    B: ChatBackend + Send + Sync,
{
    /// Create a new extractor around a backend.
    pub fn new(backend: B, config: ExtractorConfig) -> Self {
        Self { backend, config }
    }

    /// Access the wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Extract the schema's fields from a document.
    ///
    /// The backend is invoked exactly once. A malformed model response is
    /// recovered locally as an all-null fallback result; it never
    /// surfaces as an error.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::EmptySchema`] before any backend call
    /// - [`ExtractError::TextTooLong`] when the document exceeds the limit
    /// - [`ExtractError::BackendTimeout`] when the call exceeds the
    ///   configured timeout
    /// - [`ExtractError::Backend`] for provider failures
    pub async fn extract(
        &self,
        document: &ExtractedDocument,
        schema: &DynamicSchema,
    ) -> Result<ExtractionResult, ExtractError> {
        if schema.is_empty() {
            return Err(ExtractError::EmptySchema);
        }

        if document.text.len() > self.config.max_text_length {
            return Err(ExtractError::TextTooLong(
                document.text.len(),
                self.config.max_text_length,
            ));
        }

        info!(
            "starting extraction: {} fields, {} chars from {:?}, backend '{}'",
            schema.len(),
            document.text.len(),
            document.source,
            self.backend.model_name()
        );

        let mode = self.backend.mode();
        let prompt = PromptBuilder::new(schema);
        let system_prompt = prompt.system_prompt(mode);
        let user_message = prompt.user_message(&document.text);

        debug!("system prompt length: {} chars", system_prompt.len());

        let response = timeout(
            self.config.backend_timeout(),
            self.backend.invoke(&system_prompt, &user_message, Some(schema)),
        )
        .await
        .map_err(|_| ExtractError::BackendTimeout)?
        .map_err(|e| ExtractError::Backend(e.to_string()))?;

        debug!("model response length: {} chars", response.len());

        let strip_fences = mode == OutputMode::FreeText;
        let result = match parser::parse_model_output(&response, strip_fences) {
            Ok(map) => parser::conform(schema, &map),
            Err(e) => {
                warn!("malformed model output ({}); raw response: {}", e, response);
                ExtractionResult::fallback_empty(schema)
            }
        };

        info!("extraction complete: status {:?}", result.status());

        Ok(result)
    }
}

//! Trait definitions for external interactions
//!
//! These traits define the boundary between the orchestrator and the
//! LLM provider infrastructure. Implementations live in `docfields-llm`.

use crate::DynamicSchema;
use async_trait::async_trait;

/// How a backend produces structured output.
///
/// Fixed at adapter construction; the orchestrator selects its parsing
/// strategy by this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// The provider guarantees output shaped to the bound schema;
    /// no fence stripping or recovery parsing is needed.
    NativeStructured,
    /// The provider returns a raw completion; structure is imposed via
    /// prompt instructions and a JSON-parsing step that may fail.
    FreeText,
}

/// A chat-completion capability bound to one provider and model.
///
/// Holds no mutable state beyond its configured credentials. Sampling is
/// deterministic (temperature 0): outputs feed a parser with no tolerance
/// for creative variation.
#[async_trait]
pub trait ChatBackend {
    /// Error type for backend operations
    type Error: std::fmt::Display + Send + Sync + 'static;

    /// The output capability of this backend.
    fn mode(&self) -> OutputMode;

    /// Model identifier this backend is bound to.
    fn model_name(&self) -> &str;

    /// Invoke the backend once with a system prompt and user message.
    ///
    /// `schema` is provided for [`OutputMode::NativeStructured`] backends,
    /// which bind it to the provider's structured-output facility.
    /// Free-text backends may ignore it.
    async fn invoke(
        &self,
        system_prompt: &str,
        user_message: &str,
        schema: Option<&DynamicSchema>,
    ) -> Result<String, Self::Error>;
}

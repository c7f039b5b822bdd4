//! Groq backend
//!
//! Groq speaks the OpenAI-compatible chat-completions protocol but
//! returns free-text completions; structure is imposed by the prompt and
//! recovered by the orchestrator's JSON parsing step.

use crate::chat::{self, ChatMessage, ChatRequest};
use crate::BackendError;
use async_trait::async_trait;
use docfields_domain::{ChatBackend, DynamicSchema, OutputMode};

/// Groq's OpenAI-compatible chat-completions endpoint
pub const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Model identifier used for extraction
pub const GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// Groq chat backend returning free-text completions.
pub struct GroqBackend {
    api_key: String,
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl GroqBackend {
    /// Create a backend bound to [`GROQ_MODEL`] at the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: GROQ_ENDPOINT.to_string(),
            model: GROQ_MODEL.to_string(),
            client: chat::build_client(),
            max_retries: chat::DEFAULT_MAX_RETRIES,
        }
    }

    /// Override the endpoint (for proxies and tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the maximum number of retry attempts.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

#[async_trait]
impl ChatBackend for GroqBackend {
    type Error = BackendError;

    fn mode(&self) -> OutputMode {
        OutputMode::FreeText
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn invoke(
        &self,
        system_prompt: &str,
        user_message: &str,
        _schema: Option<&DynamicSchema>,
    ) -> Result<String, Self::Error> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_message.to_string(),
                },
            ],
            temperature: 0.0,
            response_format: None,
        };

        chat::send_with_retry(
            &self.client,
            &self.endpoint,
            &self.api_key,
            &request,
            self.max_retries,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_defaults() {
        let backend = GroqBackend::new("gsk-test");
        assert_eq!(backend.model_name(), GROQ_MODEL);
        assert_eq!(backend.endpoint, GROQ_ENDPOINT);
        assert_eq!(backend.mode(), OutputMode::FreeText);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_error() {
        let backend = GroqBackend::new("gsk-test")
            .with_endpoint("http://127.0.0.1:9/openai/v1/chat/completions")
            .with_max_retries(1);

        let result = backend.invoke("system", "user", None).await;
        assert!(matches!(result, Err(BackendError::Network(_))));
    }
}

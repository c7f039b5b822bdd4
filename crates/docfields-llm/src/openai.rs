//! OpenAI backend
//!
//! Binds the dynamic schema to the chat-completions `json_schema`
//! response format, so the model's output is guaranteed well-typed and
//! needs no recovery parsing downstream.

use crate::chat::{self, ChatMessage, ChatRequest};
use crate::BackendError;
use async_trait::async_trait;
use docfields_domain::{ChatBackend, DynamicSchema, OutputMode};
use serde_json::json;

/// Default OpenAI chat-completions endpoint
pub const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Model identifier used for extraction
pub const OPENAI_MODEL: &str = "gpt-4o";

/// OpenAI chat backend with native structured output.
pub struct OpenAiBackend {
    api_key: String,
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl OpenAiBackend {
    /// Create a backend bound to [`OPENAI_MODEL`] at the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: OPENAI_ENDPOINT.to_string(),
            model: OPENAI_MODEL.to_string(),
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

    /// Render the strict `json_schema` response format for a schema.
    fn response_format(schema: &DynamicSchema) -> serde_json::Value {
        json!({
            "type": "json_schema",
            "json_schema": {
                "name": "DynamicOutput",
                "strict": true,
                "schema": schema.to_json_schema(),
            }
        })
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    type Error = BackendError;

    fn mode(&self) -> OutputMode {
        OutputMode::NativeStructured
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn invoke(
        &self,
        system_prompt: &str,
        user_message: &str,
        schema: Option<&DynamicSchema>,
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
            response_format: schema.map(Self::response_format),
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
        let backend = OpenAiBackend::new("sk-test");
        assert_eq!(backend.model_name(), OPENAI_MODEL);
        assert_eq!(backend.endpoint, OPENAI_ENDPOINT);
        assert_eq!(backend.mode(), OutputMode::NativeStructured);
        assert_eq!(backend.max_retries, chat::DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_builder_overrides() {
        let backend = OpenAiBackend::new("sk-test")
            .with_endpoint("http://localhost:8080/v1/chat/completions")
            .with_max_retries(5);
        assert_eq!(backend.endpoint, "http://localhost:8080/v1/chat/completions");
        assert_eq!(backend.max_retries, 5);
    }

    #[test]
    fn test_response_format_is_strict_json_schema() {
        let schema = DynamicSchema::build(["Full Name", "email"]);
        let format = OpenAiBackend::response_format(&schema);

        assert_eq!(format["type"], "json_schema");
        assert_eq!(format["json_schema"]["strict"], true);
        assert_eq!(format["json_schema"]["name"], "DynamicOutput");
        assert_eq!(
            format["json_schema"]["schema"]["required"],
            json!(["Full_Name", "email"])
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_error() {
        let backend = OpenAiBackend::new("sk-test")
            .with_endpoint("http://127.0.0.1:9/v1/chat/completions")
            .with_max_retries(1);

        let result = backend.invoke("system", "user", None).await;
        assert!(matches!(result, Err(BackendError::Network(_))));
    }
}

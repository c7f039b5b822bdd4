//! OpenAI-compatible chat-completions wire format
//!
//! Both providers speak the same request/response shape; they differ only
//! in endpoint, model, and structured-output support.

use crate::BackendError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Default timeout for a single HTTP request (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Request body for the chat-completions API
#[derive(Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<serde_json::Value>,
}

/// One chat message
#[derive(Serialize)]
pub(crate) struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// Response body from the chat-completions API
#[derive(Deserialize)]
pub(crate) struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Deserialize)]
pub(crate) struct ChatResponseMessage {
    pub content: Option<String>,
}

/// Build the shared HTTP client.
pub(crate) fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .unwrap()
}

/// POST a chat request, retrying network errors and rate limits with
/// exponential backoff (1s, 2s, 4s, ...).
///
/// Non-retryable API errors (4xx other than 429) return immediately.
pub(crate) async fn send_with_retry(
    client: &reqwest::Client,
    url: &str,
    api_key: &str,
    request: &ChatRequest,
    max_retries: u32,
) -> Result<String, BackendError> {
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < max_retries {
        match client
            .post(url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
        {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    let body: ChatResponse = response.json().await.map_err(|e| {
                        BackendError::InvalidResponse(format!("failed to parse response: {}", e))
                    })?;
                    return body
                        .choices
                        .into_iter()
                        .next()
                        .and_then(|c| c.message.content)
                        .ok_or_else(|| {
                            BackendError::InvalidResponse("response has no content".to_string())
                        });
                } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    warn!("rate limited by {}, backing off", url);
                    last_error = Some(BackendError::RateLimited);
                } else if status.is_client_error() {
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "unknown error".to_string());
                    return Err(BackendError::Api {
                        status: status.as_u16(),
                        body,
                    });
                } else {
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "unknown error".to_string());
                    last_error = Some(BackendError::Api {
                        status: status.as_u16(),
                        body,
                    });
                }
            }
            Err(e) => {
                last_error = Some(BackendError::Network(format!("request failed: {}", e)));
            }
        }

        attempts += 1;
        if attempts < max_retries {
            let delay = Duration::from_secs(2u64.pow(attempts - 1));
            tokio::time::sleep(delay).await;
        }
    }

    Err(last_error
        .unwrap_or_else(|| BackendError::Network("max retries exceeded".to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_without_response_format() {
        let request = ChatRequest {
            model: "gpt-4o".to_string(),
            messages: vec![ChatMessage {
                role: "system",
                content: "extract".to_string(),
            }],
            temperature: 0.0,
            response_format: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["temperature"], 0.0);
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn test_response_parses_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"{}"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let client = build_client();
        let request = ChatRequest {
            model: "test".to_string(),
            messages: vec![],
            temperature: 0.0,
            response_format: None,
        };

        let result =
            send_with_retry(&client, "http://127.0.0.1:9", "key", &request, 1).await;
        assert!(matches!(result, Err(BackendError::Network(_))));
    }
}

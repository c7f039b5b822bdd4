//! docfields LLM Provider Layer
//!
//! Pluggable chat-completion backends with a uniform invoke contract.
//!
//! # Architecture
//!
//! This crate provides implementations of the `ChatBackend` trait from
//! `docfields-domain`. A backend is selected by [`BackendKind`] and bound
//! at construction to one provider, one model, and temperature 0.
//!
//! Providers divide into two capability classes the orchestrator must
//! distinguish:
//!
//! - **Native structured** ([`OpenAiBackend`]): output is guaranteed to
//!   match the bound schema.
//! - **Free text** ([`GroqBackend`]): output is a raw completion parsed
//!   downstream.
//!
//! # Examples
//!
//! ```
//! use docfields_llm::MockBackend;
//! use docfields_domain::ChatBackend;
//!
//! # tokio_test::block_on(async {
//! let backend = MockBackend::free_text(r#"{"email": null}"#);
//! let out = backend.invoke("system", "user", None).await.unwrap();
//! assert_eq!(out, r#"{"email": null}"#);
//! # });
//! ```

#![warn(missing_docs)]

mod chat;
pub mod groq;
pub mod openai;

pub use groq::{GroqBackend, GROQ_MODEL};
pub use openai::{OpenAiBackend, OPENAI_MODEL};

use async_trait::async_trait;
use docfields_domain::{ChatBackend, DynamicSchema, OutputMode};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Environment variable holding the OpenAI API key
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable holding the Groq API key
pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";

/// Errors that can occur in backend operations
#[derive(Error, Debug)]
pub enum BackendError {
    /// Required credential not present in the environment
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// Network or transport failure
    #[error("network error: {0}")]
    Network(String),

    /// Provider signaled rate limiting (HTTP 429)
    #[error("rate limit exceeded")]
    RateLimited,

    /// Provider rejected the request
    #[error("API error (HTTP {status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Response body could not be interpreted
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Unknown backend name
    #[error("unsupported backend '{0}' (expected 'openai' or 'groq')")]
    UnknownKind(String),
}

/// Symbolic backend choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// OpenAI (native structured output)
    OpenAi,
    /// Groq (free-text completion)
    Groq,
}

impl FromStr for BackendKind {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(BackendKind::OpenAi),
            "groq" => Ok(BackendKind::Groq),
            other => Err(BackendError::UnknownKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::OpenAi => write!(f, "openai"),
            BackendKind::Groq => write!(f, "groq"),
        }
    }
}

/// Provider credentials, read once at process start.
///
/// Absence of a key is only an error when the corresponding backend is
/// selected, and then it is a startup failure, not a per-request one.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    openai_api_key: Option<String>,
    groq_api_key: Option<String>,
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: read_var(OPENAI_API_KEY_VAR),
            groq_api_key: read_var(GROQ_API_KEY_VAR),
        }
    }

    /// Construct explicit credentials (tests, embedding).
    pub fn new(openai_api_key: Option<String>, groq_api_key: Option<String>) -> Self {
        Self {
            openai_api_key,
            groq_api_key,
        }
    }

    /// True if the OpenAI key is present.
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.is_some()
    }

    /// True if the Groq key is present.
    pub fn has_groq(&self) -> bool {
        self.groq_api_key.is_some()
    }
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// A constructed backend, tagged by provider.
///
/// The variant is fixed when the adapter is built; callers dispatch on
/// capability through the common [`ChatBackend`] impl.
pub enum Backend {
    /// OpenAI adapter
    OpenAi(OpenAiBackend),
    /// Groq adapter
    Groq(GroqBackend),
}

#[async_trait]
impl ChatBackend for Backend {
    type Error = BackendError;

    fn mode(&self) -> OutputMode {
        match self {
            Backend::OpenAi(b) => b.mode(),
            Backend::Groq(b) => b.mode(),
        }
    }

    fn model_name(&self) -> &str {
        match self {
            Backend::OpenAi(b) => b.model_name(),
            Backend::Groq(b) => b.model_name(),
        }
    }

    async fn invoke(
        &self,
        system_prompt: &str,
        user_message: &str,
        schema: Option<&DynamicSchema>,
    ) -> Result<String, Self::Error> {
        match self {
            Backend::OpenAi(b) => b.invoke(system_prompt, user_message, schema).await,
            Backend::Groq(b) => b.invoke(system_prompt, user_message, schema).await,
        }
    }
}

/// Build a backend for `kind` from the given credentials.
///
/// # Errors
///
/// [`BackendError::MissingCredential`] when the selected provider's key
/// is absent.
pub fn get_backend(kind: BackendKind, credentials: &Credentials) -> Result<Backend, BackendError> {
    match kind {
        BackendKind::OpenAi => {
            let key = credentials
                .openai_api_key
                .as_deref()
                .ok_or(BackendError::MissingCredential(OPENAI_API_KEY_VAR))?;
            Ok(Backend::OpenAi(OpenAiBackend::new(key)))
        }
        BackendKind::Groq => {
            let key = credentials
                .groq_api_key
                .as_deref()
                .ok_or(BackendError::MissingCredential(GROQ_API_KEY_VAR))?;
            Ok(Backend::Groq(GroqBackend::new(key)))
        }
    }
}

/// Deterministic mock backend for testing.
///
/// Returns pre-configured responses without network calls. Records the
/// prompts it was invoked with and counts invocations.
#[derive(Clone)]
pub struct MockBackend {
    mode: OutputMode,
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    call_count: Arc<Mutex<usize>>,
    last_system_prompt: Arc<Mutex<Option<String>>>,
}

impl MockBackend {
    /// Create a free-text mock with a fixed response for all prompts.
    pub fn free_text(response: impl Into<String>) -> Self {
        Self::with_mode(OutputMode::FreeText, response)
    }

    /// Create a native-structured mock with a fixed response.
    pub fn native(response: impl Into<String>) -> Self {
        Self::with_mode(OutputMode::NativeStructured, response)
    }

    fn with_mode(mode: OutputMode, response: impl Into<String>) -> Self {
        Self {
            mode,
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_system_prompt: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a specific response for a given user message.
    pub fn add_response(&mut self, user_message: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(user_message.into(), response.into());
    }

    /// Configure an error for a specific user message.
    pub fn add_error(&mut self, user_message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(user_message.into(), "ERROR".to_string());
    }

    /// Number of times `invoke` was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// The system prompt from the most recent invocation.
    pub fn last_system_prompt(&self) -> Option<String> {
        self.last_system_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for MockBackend {
    type Error = BackendError;

    fn mode(&self) -> OutputMode {
        self.mode
    }

    fn model_name(&self) -> &str {
        "mock"
    }

    async fn invoke(
        &self,
        system_prompt: &str,
        user_message: &str,
        _schema: Option<&DynamicSchema>,
    ) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_system_prompt.lock().unwrap() = Some(system_prompt.to_string());

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(user_message) {
            if response == "ERROR" {
                return Err(BackendError::Network("mock error".to_string()));
            }
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }
}

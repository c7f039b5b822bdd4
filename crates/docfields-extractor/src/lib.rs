//! docfields Extractor
//!
//! Turns document text into schema-shaped field values via an LLM
//! backend.
//!
//! # Architecture
//!
//! ```text
//! ExtractedDocument + DynamicSchema → Prompt → Backend → Parse → ExtractionResult
//! ```
//!
//! # Key Behaviors
//!
//! - **Single call per request**: retries live in the backend adapter,
//!   not here; a bounded timeout surfaces as `BackendTimeout`.
//! - **Mode-aware parsing**: native-structured output is parsed directly;
//!   free-text output is fence-stripped first.
//! - **Graceful degradation**: a malformed model response becomes an
//!   all-null fallback result, never an error to the caller.
//! - **Schema is authoritative**: missing fields become null, extraneous
//!   fields are dropped, output keys equal the schema's identifiers.
//!
//! # Example
//!
//! ```
//! use docfields_domain::{DynamicSchema, ExtractedDocument, ExtractionMethod};
//! use docfields_extractor::{ExtractorConfig, FieldExtractor};
//! use docfields_llm::MockBackend;
//!
//! # tokio_test::block_on(async {
//! let backend = MockBackend::free_text(r#"{"email": "jd@example.com"}"#);
//! let extractor = FieldExtractor::new(backend, ExtractorConfig::default());
//!
//! let schema = DynamicSchema::build(["email"]);
//! let document = ExtractedDocument::new(
//!     "Reach me at jd@example.com",
//!     "inbox.txt",
//!     ExtractionMethod::DirectText,
//! );
//!
//! let result = extractor.extract(&document, &schema).await.unwrap();
//! assert_eq!(result.get("email").unwrap().as_deref(), Some("jd@example.com"));
//! # });
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
pub mod parser;
mod prompt;
mod types;


pub use config::ExtractorConfig;
pub use error::ExtractError;
pub use extractor::FieldExtractor;
pub use prompt::PromptBuilder;
pub use types::{ExtractionResult, ExtractionStatus, FieldValue};

//! docfields Domain Model
//!
//! Core types shared across the extraction pipeline.
//!
//! # Architecture
//!
//! This crate defines the data model and the trait seams between the
//! pipeline stages. Infrastructure implementations (OCR, LLM providers)
//! live in other crates.
//!
//! # Key Types
//!
//! - [`DynamicSchema`]: runtime-built field schema driving prompts and validation
//! - [`ExtractedDocument`]: raw document text plus extraction provenance
//! - [`ChatBackend`]: the provider seam implemented by `docfields-llm`
//!
//! # Examples
//!
//! ```
//! use docfields_domain::DynamicSchema;
//!
//! let schema = DynamicSchema::build(["Full Name", "email"]);
//! assert_eq!(schema.idents().collect::<Vec<_>>(), vec!["Full_Name", "email"]);
//! ```

#![warn(missing_docs)]

mod document;
mod schema;
pub mod traits;

pub use document::{ExtractedDocument, ExtractionMethod};
pub use schema::{DynamicSchema, FieldSpec};
pub use traits::{ChatBackend, OutputMode};

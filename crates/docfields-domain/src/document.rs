//! Extracted document text and provenance

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the text was obtained from the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Read from an embedded text layer (PDF text objects, DOCX runs)
    DirectText,
    /// Optical character recognition over rasterized pages/images
    Ocr,
}

/// Raw text extracted from one source file.
///
/// Created by `docfields-ocr`, consumed once by the orchestrator,
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// The extracted text, pages concatenated in order
    pub text: String,

    /// Path the text came from
    pub source: PathBuf,

    /// Extraction method used
    pub method: ExtractionMethod,
}

impl ExtractedDocument {
    /// Create a new extracted document.
    pub fn new(text: impl Into<String>, source: impl Into<PathBuf>, method: ExtractionMethod) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            method,
        }
    }
}

//! docfields OCR - Text Extraction from Documents
//!
//! Converts a file path into raw text based on its extension.
//!
//! # Dispatch
//!
//! - `.png` / `.jpg` / `.jpeg` → image OCR (tesseract)
//! - `.docx` → paragraph concatenation from the WordprocessingML body
//! - `.pdf` → embedded text layer first, per-page OCR fallback when the
//!   layer is sparse (< 50 chars) or `force_ocr` is set
//! - `.doc` → unsupported (no converter bundled)
//! - anything else → image OCR as a last resort
//!
//! OCR shells out to `tesseract` (and `pdftoppm` from poppler-utils for
//! PDF rasterization); [`is_ocr_available`] probes for both.
//!
//! # Examples
//!
//! ```no_run
//! use docfields_ocr::{extract_text, OcrOptions};
//!
//! let doc = extract_text("resume_scan-1.png".as_ref(), &OcrOptions::default())?;
//! println!("extracted {} chars via {:?}", doc.text.len(), doc.method);
//! # Ok::<(), docfields_ocr::OcrError>(())
//! ```

#![warn(missing_docs)]

mod docx;
mod ocr;
mod pdf;

pub use ocr::{is_ocr_available, pdftoppm_available, tesseract_available};
pub use pdf::MIN_TEXT_THRESHOLD;

use docfields_domain::{ExtractedDocument, ExtractionMethod};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during text extraction
#[derive(Error, Debug)]
pub enum OcrError {
    /// Input file does not exist
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// File format has no extraction path
    #[error("unsupported format {format}: {hint}")]
    UnsupportedFormat {
        /// The offending extension
        format: String,
        /// Remediation hint for the user
        hint: String,
    },

    /// OCR or parsing internals failed
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for text extraction
#[derive(Debug, Clone, Copy, Default)]
pub struct OcrOptions {
    /// Skip the PDF text layer and OCR every page
    pub force_ocr: bool,
}

/// Extract text from a file based on its extension.
///
/// # Errors
///
/// - [`OcrError::NotFound`] if the path does not exist
/// - [`OcrError::UnsupportedFormat`] for `.doc` and unrecognized formats
/// - [`OcrError::Extraction`] when OCR or document parsing fails
pub fn extract_text(path: &Path, options: &OcrOptions) -> Result<ExtractedDocument, OcrError> {
    if !path.exists() {
        return Err(OcrError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    debug!("extracting text from {:?} (ext: {:?})", path, ext);

    match ext.as_str() {
        "png" | "jpg" | "jpeg" => {
            let text = ocr::image_to_text(path)?;
            Ok(ExtractedDocument::new(text, path, ExtractionMethod::Ocr))
        }
        "docx" => {
            let text = docx::extract_docx_text(path)?;
            Ok(ExtractedDocument::new(text, path, ExtractionMethod::DirectText))
        }
        "pdf" => pdf::extract_pdf(path, options.force_ocr),
        "doc" => Err(OcrError::UnsupportedFormat {
            format: ".doc".to_string(),
            hint: "legacy .doc is not supported; convert it to .docx or .pdf".to_string(),
        }),
        other => {
            // Unknown extension: try reading it as an image before giving up.
            match ocr::image_to_text(path) {
                Ok(text) => Ok(ExtractedDocument::new(text, path, ExtractionMethod::Ocr)),
                Err(_) => Err(OcrError::UnsupportedFormat {
                    format: if other.is_empty() {
                        "(none)".to_string()
                    } else {
                        format!(".{}", other)
                    },
                    hint: "convert to .png, .jpg, .pdf or .docx".to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_found() {
        let result = extract_text(Path::new("/nonexistent/input.pdf"), &OcrOptions::default());
        assert!(matches!(result, Err(OcrError::NotFound(_))));
    }

    #[test]
    fn test_legacy_doc_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.doc");
        std::fs::write(&path, b"\xd0\xcf\x11\xe0 legacy").unwrap();

        let result = extract_text(&path, &OcrOptions::default());
        match result {
            Err(OcrError::UnsupportedFormat { format, hint }) => {
                assert_eq!(format, ".doc");
                assert!(hint.contains(".docx"));
            }
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_extension_falls_through_to_unsupported() {
        // Not a decodable image, so the OCR last resort fails and the
        // error reports the original extension.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.xyz");
        std::fs::write(&path, b"not an image").unwrap();

        let result = extract_text(&path, &OcrOptions::default());
        match result {
            Err(OcrError::UnsupportedFormat { format, .. }) => assert_eq!(format, ".xyz"),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_error_display_is_descriptive() {
        let err = OcrError::NotFound(PathBuf::from("/tmp/x.pdf"));
        assert!(err.to_string().contains("/tmp/x.pdf"));

        let err = OcrError::UnsupportedFormat {
            format: ".doc".into(),
            hint: "convert it".into(),
        };
        assert!(err.to_string().contains(".doc"));
        assert!(err.to_string().contains("convert it"));
    }
}

//! PDF text extraction with OCR fallback
//!
//! The embedded text layer is read with lopdf. When the layer is sparse
//! (below [`MIN_TEXT_THRESHOLD`] chars) or the caller forces OCR, pages
//! are rasterized and run through tesseract one by one, concatenated in
//! page order.

use crate::{ocr, OcrError};
use docfields_domain::{ExtractedDocument, ExtractionMethod};
use lopdf::Document;
use std::path::Path;
use tracing::{info, warn};

/// Minimum embedded-text length (chars) below which a PDF is treated as
/// scanned and routed to OCR.
pub const MIN_TEXT_THRESHOLD: usize = 50;

/// Extract text from a PDF, preferring the embedded text layer.
pub(crate) fn extract_pdf(path: &Path, force_ocr: bool) -> Result<ExtractedDocument, OcrError> {
    if !force_ocr {
        match extract_text_layer(path) {
            Ok(text) if !needs_ocr(text.trim().len(), force_ocr) => {
                return Ok(ExtractedDocument::new(text, path, ExtractionMethod::DirectText));
            }
            Ok(text) => {
                info!(
                    "text layer too sparse ({} chars < {}), falling back to OCR",
                    text.trim().len(),
                    MIN_TEXT_THRESHOLD
                );
            }
            Err(e) => {
                warn!("text layer extraction failed ({}), falling back to OCR", e);
            }
        }
    }

    let text = ocr_pdf(path)?;
    Ok(ExtractedDocument::new(text, path, ExtractionMethod::Ocr))
}

/// OCR routing decision for a PDF's embedded text layer.
pub(crate) fn needs_ocr(text_layer_len: usize, force_ocr: bool) -> bool {
    force_ocr || text_layer_len < MIN_TEXT_THRESHOLD
}

/// Read the embedded text layer, pages concatenated in page order.
fn extract_text_layer(path: &Path) -> Result<String, OcrError> {
    let doc = Document::load(path)
        .map_err(|e| OcrError::Extraction(format!("failed to load PDF: {}", e)))?;

    let pages = doc.get_pages();
    let mut page_numbers: Vec<u32> = pages.keys().copied().collect();
    page_numbers.sort_unstable();

    let mut text = String::new();
    for page_num in page_numbers {
        match doc.extract_text(&[page_num]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(e) => {
                // Pages with no text objects are common in scanned PDFs.
                warn!("no text extracted from page {}: {}", page_num, e);
            }
        }
    }

    Ok(text)
}

/// Rasterize and OCR every page, sequentially, preserving page order.
fn ocr_pdf(path: &Path) -> Result<String, OcrError> {
    if !ocr::is_ocr_available() {
        return Err(OcrError::Extraction(
            "PDF OCR requires pdftoppm (poppler-utils) and tesseract-ocr to be installed"
                .to_string(),
        ));
    }

    let temp_dir = tempfile::tempdir()?;
    let pages = ocr::rasterize_pdf(path, temp_dir.path())?;
    let total = pages.len();

    info!("rendered {} pages, starting OCR", total);

    let mut text = String::new();
    for (i, page) in pages.iter().enumerate() {
        info!("processing page {}/{}", i + 1, total);
        let page_text = ocr::image_to_text(page).map_err(|e| {
            OcrError::Extraction(format!("OCR failed on page {}: {}", i + 1, e))
        })?;
        text.push_str(&page_text);
        text.push('\n');
    }

    info!("OCR complete: {} pages, {} chars", total, text.len());

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_ocr_below_threshold() {
        // A 10-char text layer with force_ocr=false must route to OCR.
        assert!(needs_ocr(10, false));
    }

    #[test]
    fn test_needs_ocr_at_threshold() {
        assert!(!needs_ocr(MIN_TEXT_THRESHOLD, false));
        assert!(needs_ocr(MIN_TEXT_THRESHOLD - 1, false));
    }

    #[test]
    fn test_needs_ocr_forced() {
        assert!(needs_ocr(10_000, true));
    }

    #[test]
    fn test_text_rich_layer_skips_ocr() {
        assert!(!needs_ocr(4_200, false));
    }

    #[test]
    fn test_corrupt_pdf_is_wrapped_extraction_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"%PDF-1.4 garbage").unwrap();

        // Text layer fails, then OCR fails (either tools missing or
        // pdftoppm rejecting the file); both wrap into Extraction.
        let result = extract_pdf(&path, false);
        assert!(matches!(result, Err(OcrError::Extraction(_))));
    }
}

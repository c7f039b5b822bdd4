//! Tesseract/pdftoppm invocation
//!
//! OCR is delegated to the system `tesseract` binary; PDF pages are
//! rasterized with `pdftoppm` from poppler-utils.

use crate::OcrError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// True if the `tesseract` binary can be executed.
pub fn tesseract_available() -> bool {
    Command::new("tesseract").arg("--version").output().is_ok()
}

/// True if the `pdftoppm` binary can be executed.
pub fn pdftoppm_available() -> bool {
    Command::new("pdftoppm").arg("-v").output().is_ok()
}

/// True if both OCR tools are present.
pub fn is_ocr_available() -> bool {
    let tesseract = tesseract_available();
    let pdftoppm = pdftoppm_available();

    if !tesseract {
        debug!("tesseract not found - install tesseract-ocr for OCR support");
    }
    if !pdftoppm {
        debug!("pdftoppm not found - install poppler-utils for PDF OCR support");
    }

    tesseract && pdftoppm
}

/// Run tesseract over a single image and return the recognized text.
pub(crate) fn image_to_text(path: &Path) -> Result<String, OcrError> {
    let output = Command::new("tesseract")
        .arg(path)
        .arg("stdout")
        .arg("-l")
        .arg("eng")
        .arg("--psm")
        .arg("1")
        .output()
        .map_err(|e| OcrError::Extraction(format!("failed to run tesseract: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(OcrError::Extraction(format!(
            "tesseract failed on {:?}: {}",
            path.file_name().unwrap_or_default(),
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Rasterize a PDF into per-page PNGs inside `dir`, returned in page order.
pub(crate) fn rasterize_pdf(path: &Path, dir: &Path) -> Result<Vec<PathBuf>, OcrError> {
    let output_prefix = dir.join("page");

    let output = Command::new("pdftoppm")
        .arg("-png")
        .arg("-r")
        .arg("300")
        .arg(path)
        .arg(&output_prefix)
        .output()
        .map_err(|e| OcrError::Extraction(format!("failed to run pdftoppm: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(OcrError::Extraction(format!(
            "pdftoppm failed: {}",
            stderr.trim()
        )));
    }

    let mut pages: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
        .collect();

    // pdftoppm zero-pads page numbers, so lexicographic order is page order.
    pages.sort();

    if pages.is_empty() {
        return Err(OcrError::Extraction(
            "pdftoppm produced no images".to_string(),
        ));
    }

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_probes_do_not_panic() {
        // Tool presence varies by machine; the probe itself must be safe.
        let _ = tesseract_available();
        let _ = pdftoppm_available();
        let _ = is_ocr_available();
    }

    #[test]
    fn test_image_to_text_missing_file() {
        // Either tesseract is absent (spawn error) or it rejects the
        // missing input; both surface as Extraction.
        let result = image_to_text(Path::new("/nonexistent/scan.png"));
        assert!(matches!(result, Err(OcrError::Extraction(_))));
    }
}

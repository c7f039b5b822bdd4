//! DOCX text extraction
//!
//! DOCX files are ZIP archives; the body lives in `word/document.xml` as
//! WordprocessingML. Text runs are `<w:t>` elements; paragraphs close
//! with `</w:p>` and become newlines.

use crate::OcrError;
use std::io::Read;
use std::path::Path;

/// Extract paragraph text from a DOCX file.
pub(crate) fn extract_docx_text(path: &Path) -> Result<String, OcrError> {
    let file = std::fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| OcrError::Extraction(format!("failed to read DOCX as ZIP: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| OcrError::Extraction(format!("DOCX has no word/document.xml: {}", e)))?
        .read_to_string(&mut xml)
        .map_err(|e| OcrError::Extraction(format!("failed to read document.xml: {}", e)))?;

    Ok(text_from_document_xml(&xml))
}

/// Pull the text content out of WordprocessingML.
///
/// Collects character data inside `<w:t>`/`<w:t ...>` elements and emits a
/// newline for each closed paragraph, then trims trailing whitespace.
fn text_from_document_xml(xml: &str) -> String {
    let mut text = String::new();
    let mut rest = xml;

    loop {
        // Next interesting tag: a text run or a paragraph close.
        let run_at = rest.find("<w:t");
        let para_at = rest.find("</w:p>");

        match (run_at, para_at) {
            (Some(r), p) if p.is_none() || r < p.unwrap() => {
                let after_tag = &rest[r..];
                // `<w:t>` or `<w:t xml:space="preserve">`; skip `<w:tab/>` etc.
                let Some(gt) = after_tag.find('>') else { break };
                let tag = &after_tag[..gt];
                if !(tag == "<w:t" || tag.starts_with("<w:t ")) {
                    rest = &rest[r + 4..];
                    continue;
                }
                let content_start = &after_tag[gt + 1..];
                let Some(end) = content_start.find("</w:t>") else { break };
                text.push_str(&decode_entities(&content_start[..end]));
                rest = &content_start[end + 6..];
            }
            (_, Some(p)) => {
                if !text.ends_with('\n') && !text.is_empty() {
                    text.push('\n');
                }
                rest = &rest[p + 6..];
            }
            (None, None) => break,
            // Unreachable: when `para_at` is None the first arm's guard
            // (`p.is_none() || ...`) is always true, so `(Some(_), None)`
            // always matches arm 1 above.
            (Some(_), None) => unreachable!(),
        }
    }

    text.trim_end().to_string()
}

/// Decode the five predefined XML entities.
fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

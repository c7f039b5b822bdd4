//! Check command implementation.

use crate::error::Result;
use crate::output::Formatter;
use docfields_llm::{Credentials, GROQ_API_KEY_VAR, OPENAI_API_KEY_VAR};
use docfields_ocr::{pdftoppm_available, tesseract_available};

/// Execute the check command: report OCR tools and credentials.
pub fn execute_check(formatter: &Formatter) -> Result<()> {
    report_tool(formatter, "tesseract", tesseract_available(), "install tesseract-ocr");
    report_tool(formatter, "pdftoppm", pdftoppm_available(), "install poppler-utils");

    let credentials = Credentials::from_env();
    report_credential(formatter, OPENAI_API_KEY_VAR, credentials.has_openai());
    report_credential(formatter, GROQ_API_KEY_VAR, credentials.has_groq());

    Ok(())
}

fn report_tool(formatter: &Formatter, name: &str, available: bool, hint: &str) {
    if available {
        println!("{}", formatter.success(&format!("{} found", name)));
    } else {
        println!("{}", formatter.error(&format!("{} not found ({})", name, hint)));
    }
}

fn report_credential(formatter: &Formatter, var: &str, present: bool) {
    if present {
        println!("{}", formatter.success(&format!("{} is set", var)));
    } else {
        println!("{}", formatter.info(&format!("{} is not set", var)));
    }
}

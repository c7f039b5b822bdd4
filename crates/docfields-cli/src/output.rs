//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use docfields_extractor::{ExtractionResult, ExtractionStatus};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an extraction result.
    pub fn format_result(&self, result: &ExtractionResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(result.to_pretty_json()),
            OutputFormat::Table => Ok(self.format_result_table(result)),
            OutputFormat::Quiet => Ok(Self::format_result_quiet(result)),
        }
    }

    /// Format a result as a field/value table with a status line.
    fn format_result_table(&self, result: &ExtractionResult) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);

        for field in result.iter() {
            let value = field.value.as_deref().unwrap_or("(not found)");
            builder.push_record([field.ident.as_str(), value]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let status = match result.status() {
            ExtractionStatus::Success => self.colorize("status: success", "green"),
            ExtractionStatus::Partial => self.colorize("status: partial", "yellow"),
            ExtractionStatus::FallbackEmpty => {
                self.colorize("status: fallback-empty (model output was not valid JSON)", "red")
            }
        };

        format!("{}\n{}", table, status)
    }

    /// Quiet mode: one `field<TAB>value` line per field, empty for null.
    fn format_result_quiet(result: &ExtractionResult) -> String {
        result
            .iter()
            .map(|f| format!("{}\t{}", f.ident, f.value.as_deref().unwrap_or("")))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "red" => text.red().to_string(),
            "yellow" => text.yellow().to_string(),
            "blue" => text.blue().to_string(),
            _ => text.to_string(),
        }
    }
}

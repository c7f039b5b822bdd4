//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docfields - Extract structured fields from unstructured documents.
#[derive(Debug, Parser)]
#[command(name = "docfields")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// JSON object (default)
    Json,
    /// Field/value table
    Table,
    /// One value per line
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract fields from a document
    Extract(ExtractArgs),

    /// Report OCR tool and credential availability
    Check,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Path to the document (.png, .jpg, .jpeg, .pdf, .docx)
    pub path: PathBuf,

    /// Fields to extract (comma-separated, e.g. 'Full Name,phone_number,email')
    #[arg(short = 'F', long)]
    pub fields: String,

    /// Backend to use (openai or groq)
    #[arg(short, long)]
    pub backend: Option<String>,

    /// Skip the PDF text layer and OCR every page
    #[arg(long)]
    pub force_ocr: bool,

    /// Backend call timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

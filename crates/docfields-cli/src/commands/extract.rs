//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docfields_domain::DynamicSchema;
use docfields_extractor::{ExtractorConfig, FieldExtractor};
use docfields_llm::{get_backend, BackendKind, Credentials};
use docfields_ocr::OcrOptions;
use tracing::info;

/// Execute the extract command.
pub async fn execute_extract(
    args: ExtractArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let schema = DynamicSchema::build(args.fields.split(','));
    if schema.is_empty() {
        return Err(CliError::InvalidInput(
            "no fields specified (use --fields 'name,phone,email')".to_string(),
        ));
    }

    // Resolve the backend before touching the document: a missing
    // credential is a startup failure, not a per-request one.
    let kind: BackendKind = args
        .backend
        .as_deref()
        .unwrap_or(&config.backend)
        .parse()?;
    let credentials = Credentials::from_env();
    let backend = get_backend(kind, &credentials)?;

    let options = OcrOptions {
        force_ocr: args.force_ocr,
    };
    let document = docfields_ocr::extract_text(&args.path, &options)?;
    info!(
        "extracted {} chars from {:?} via {:?}",
        document.text.len(),
        args.path,
        document.method
    );

    let mut extractor_config = ExtractorConfig::default();
    extractor_config.backend_timeout_secs =
        args.timeout_secs.unwrap_or(config.settings.timeout_secs);
    extractor_config.validate().map_err(CliError::Config)?;

    let extractor = FieldExtractor::new(backend, extractor_config);
    let result = extractor.extract(&document, &schema).await?;

    println!("{}", formatter.format_result(&result)?);

    Ok(())
}

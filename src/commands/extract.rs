use std::path::PathBuf;
use std::process::ExitCode;

use dte_lib::{DteError, DteOutput, ExtractOutput, InputSource, DTE_OUTPUT_VERSION};

use super::{process_capture, CaptureJob};
use crate::cli::{EmitFormat, OutputFormat};
use crate::formatting::{render_error, write_output};
use crate::settings::{
    format_effective_config, load_config, resolve_extraction_params, ExtractFlagSources,
};

/// Run the extract command.
#[allow(clippy::too_many_arguments)]
pub async fn run_extract(
    raw_args: &[String],
    config_path: Option<PathBuf>,
    verbose: bool,
    input: String,
    motion_events: Option<PathBuf>,
    url: Option<String>,
    max_elements: u32,
    fast: bool,
    emit: EmitFormat,
    out: Option<PathBuf>,
    format: OutputFormat,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format),
    };
    let flag_sources = ExtractFlagSources::from_args(raw_args);
    let params = resolve_extraction_params(max_elements, fast, &config, &flag_sources);

    if verbose {
        eprintln!(
            "{}",
            format_effective_config(&params, &config, config_path.as_deref())
        );
    }

    let source = InputSource::parse(&input);
    let job = CaptureJob {
        input: source.clone(),
        motion_events,
        url,
        params,
        artifacts: emit.artifacts(),
        out,
        stem: None,
    };

    // Aggregation is CPU-bound and reads stdin; keep it off the async workers.
    let outcome = tokio::task::spawn_blocking(move || process_capture(&job, &config))
        .await
        .unwrap_or_else(|e| Err(DteError::Unknown(format!("extract task failed: {e}"))));

    let processed = match outcome {
        Ok(processed) => processed,
        Err(err) => return render_error(err, format),
    };

    let body = DteOutput::Extract(ExtractOutput {
        version: DTE_OUTPUT_VERSION.to_string(),
        input: source.describe(),
        url: processed.url,
        extracted_at: processed.extracted_at,
        files: processed.files,
        summary: processed.summary,
    });

    if let Err(err) = write_output(&body, format) {
        return render_error(DteError::Unknown(err.to_string()), format);
    }
    ExitCode::SUCCESS
}

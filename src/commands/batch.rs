use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use futures::stream::{self, StreamExt};

use dte_lib::{
    sanitize_filename_part, BatchItem, BatchOutput, DteError, DteOutput, InputSource,
    DTE_OUTPUT_VERSION,
};

use super::{process_capture, CaptureJob, ProcessedCapture};
use crate::cli::{EmitFormat, OutputFormat};
use crate::formatting::{exit_code_for_batch, render_error, write_output};
use crate::settings::{
    format_effective_config, load_config, resolve_extraction_params, ExtractFlagSources,
};

/// Run the batch command.
pub async fn run_batch(
    config_path: Option<PathBuf>,
    verbose: bool,
    inputs: Vec<PathBuf>,
    out_dir: PathBuf,
    emit: EmitFormat,
    jobs: usize,
    format: OutputFormat,
) -> ExitCode {
    let config = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format),
    };
    let params = resolve_extraction_params(
        config.max_elements,
        false,
        &config,
        &ExtractFlagSources::default(),
    );
    if verbose {
        eprintln!(
            "{}",
            format_effective_config(&params, &config, config_path.as_deref())
        );
    }

    if let Err(err) = std::fs::create_dir_all(&out_dir) {
        return render_error(DteError::Io(err), format);
    }

    let config = Arc::new(config);
    let artifacts = emit.artifacts();
    let stems = batch_stems(&inputs);
    let total = inputs.len();
    let concurrency = jobs.max(1);
    tracing::info!(total, concurrency, out_dir = %out_dir.display(), "starting batch");

    let mut results: Vec<(usize, BatchItem)> = stream::iter(inputs.into_iter().zip(stems).enumerate())
        .map(|(index, (path, stem))| {
            let config = Arc::clone(&config);
            let label = path.display().to_string();
            let job = CaptureJob {
                input: InputSource::File(path),
                motion_events: None,
                url: None,
                params,
                artifacts: artifacts.clone(),
                out: Some(out_dir.clone()),
                stem: Some(stem),
            };
            async move {
                let outcome = tokio::task::spawn_blocking(move || process_capture(&job, &config))
                    .await
                    .unwrap_or_else(|e| Err(DteError::Unknown(format!("batch task failed: {e}"))));
                if verbose {
                    eprintln!("[{}/{}] {}", index + 1, total, label);
                }
                (index, batch_item(label, outcome))
            }
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;
    results.sort_by_key(|(index, _)| *index);

    let results: Vec<BatchItem> = results.into_iter().map(|(_, item)| item).collect();
    let failed = results.iter().filter(|item| !item.ok).count();
    let body = DteOutput::Batch(BatchOutput {
        version: DTE_OUTPUT_VERSION.to_string(),
        out_dir,
        succeeded: results.len() - failed,
        failed,
        results,
    });

    if let Err(err) = write_output(&body, format) {
        return render_error(DteError::Unknown(err.to_string()), format);
    }
    exit_code_for_batch(failed)
}

fn batch_item(input: String, outcome: Result<ProcessedCapture, DteError>) -> BatchItem {
    match outcome {
        Ok(processed) => BatchItem {
            input,
            ok: true,
            url: Some(processed.url),
            files: processed.files,
            summary: Some(processed.summary),
            error: None,
        },
        Err(err) => {
            tracing::warn!(input = %input, error = %err, "capture failed");
            BatchItem {
                input,
                ok: false,
                url: None,
                files: Vec::new(),
                summary: None,
                error: Some(err.to_payload()),
            }
        }
    }
}

/// File-stem based artifact names, suffixed `-2`, `-3`, ... until unused.
fn batch_stems(inputs: &[PathBuf]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    inputs
        .iter()
        .map(|path| {
            let base = path
                .file_stem()
                .map(|s| sanitize_filename_part(&s.to_string_lossy()))
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "capture".to_string());
            let mut stem = base.clone();
            let mut n = 1;
            while taken.contains(&stem) {
                n += 1;
                stem = format!("{base}-{n}");
            }
            taken.insert(stem.clone());
            stem
        })
        .collect()
}

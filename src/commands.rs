mod batch;
mod extract;

use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use dte_lib::{
    aggregate, artifact_stem, css_custom_properties, resolve_artifact_path, tailwind_config,
    validate_source_url, write_atomic, AggregationContext, ArtifactFormat, ArtifactKind,
    CaptureDocument, Config, DteError, ExtractionParams, GeneratedFile, InputSource,
    MotionEventLog, TokenSet, TokenSummary,
};

pub use batch::run_batch;
pub use extract::run_extract;

/// One capture to aggregate, and where its artifacts go.
#[derive(Debug, Clone)]
pub(crate) struct CaptureJob {
    pub input: InputSource,
    pub motion_events: Option<PathBuf>,
    pub url: Option<String>,
    pub params: ExtractionParams,
    pub artifacts: Vec<ArtifactKind>,
    pub out: Option<PathBuf>,
    /// Artifact base name; derived from the source when absent.
    pub stem: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct ProcessedCapture {
    pub url: String,
    pub extracted_at: String,
    pub files: Vec<GeneratedFile>,
    pub summary: TokenSummary,
}

/// Read, aggregate and export a single capture.
pub(crate) fn process_capture(job: &CaptureJob, config: &Config) -> Result<ProcessedCapture, DteError> {
    let contents = job.input.read_to_string()?;
    let mut capture = CaptureDocument::from_json_str(&contents)?;

    if let Some(path) = &job.motion_events {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DteError::Config(format!("Failed to read motion events {}: {e}", path.display()))
        })?;
        capture.motion_events = MotionEventLog::from_json_str(&raw)?;
    }

    let source_url = match job.url.as_deref().or(capture.url.as_deref()) {
        Some(raw) => Some(validate_source_url(raw)?),
        None => None,
    };
    let url = source_url.clone().unwrap_or_else(|| job.input.describe());
    tracing::info!(
        input = %job.input.describe(),
        url = %url,
        events = capture.motion_events.len(),
        "aggregating capture"
    );

    let context = AggregationContext::new(url.clone(), Utc::now()).with_params(job.params);
    let tokens = aggregate(&capture.extraction, &capture.motion_events, &context, config);

    let stem = job
        .stem
        .clone()
        .unwrap_or_else(|| artifact_stem(source_url.as_deref(), job.input.path()));
    let files = write_artifacts(&tokens, &job.artifacts, job.out.as_deref(), &stem)?;

    Ok(ProcessedCapture {
        url,
        extracted_at: tokens
            .meta
            .extracted_at
            .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        files,
        summary: tokens.summary(),
    })
}

fn write_artifacts(
    tokens: &TokenSet,
    artifacts: &[ArtifactKind],
    out: Option<&std::path::Path>,
    stem: &str,
) -> Result<Vec<GeneratedFile>, DteError> {
    let single = artifacts.len() == 1;
    let mut files = Vec::with_capacity(artifacts.len());
    for kind in artifacts {
        let path = resolve_artifact_path(out, stem, *kind, single);
        let (format, contents) = match kind {
            ArtifactKind::Json => (ArtifactFormat::Json, serde_json::to_string_pretty(tokens)?),
            ArtifactKind::Css => (ArtifactFormat::Css, css_custom_properties(tokens)),
            ArtifactKind::Tailwind => (ArtifactFormat::Tailwind, tailwind_config(tokens)?),
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        write_atomic(&path, &contents)?;
        tracing::debug!(path = %path.display(), "wrote artifact");
        files.push(GeneratedFile { format, path });
    }
    Ok(files)
}

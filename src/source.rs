//! Capture inputs, source URLs and artifact paths.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use url::Url;

use crate::error::{DteError, Result};

const MAX_FILENAME_PART: usize = 120;
const FALLBACK_STEM: &str = "site";

/// Where a capture document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` means stdin; anything else is a file path.
    pub fn parse(value: &str) -> Self {
        if value == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(PathBuf::from(value))
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            InputSource::Stdin => None,
            InputSource::File(p) => Some(p),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            InputSource::Stdin => "<stdin>".to_string(),
            InputSource::File(p) => p.display().to_string(),
        }
    }

    pub fn read_to_string(&self) -> Result<String> {
        match self {
            InputSource::Stdin => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
            InputSource::File(path) => {
                let metadata = fs::metadata(path).map_err(|_| {
                    DteError::Config(format!("Capture file not found: {}", path.display()))
                })?;
                if !metadata.is_file() {
                    return Err(DteError::Config(format!(
                        "Capture path is not a file: {}",
                        path.display()
                    )));
                }
                Ok(fs::read_to_string(path)?)
            }
        }
    }
}

/// Accept absolute http(s) URLs only; returns the normalized form.
pub fn validate_source_url(value: &str) -> Result<String> {
    let url = Url::parse(value.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        other => Err(DteError::Config(format!(
            "Unsupported URL scheme '{other}' in '{value}': only http/https URLs are accepted"
        ))),
    }
}

/// Lower-case and reduce to `[a-z0-9.-]`, dash-separated, at most 120 chars.
pub fn sanitize_filename_part(value: &str) -> String {
    let lower = value.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    for ch in lower.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '.' || ch == '-' {
            if ch == '-' && out.ends_with('-') {
                continue;
            }
            out.push(ch);
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').chars().take(MAX_FILENAME_PART).collect()
}

/// Files the extract command can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Json,
    Css,
    Tailwind,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [ArtifactKind::Json, ArtifactKind::Css, ArtifactKind::Tailwind];

    pub fn suffix(&self) -> &'static str {
        match self {
            ArtifactKind::Json => "-extract.json",
            ArtifactKind::Css => "-tokens.css",
            ArtifactKind::Tailwind => "-tailwind.config.js",
        }
    }

    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}{}", self.suffix())
    }
}

/// Base name for artifacts: URL host, else input file stem, else `site`.
pub fn artifact_stem(source_url: Option<&str>, input: Option<&Path>) -> String {
    let from_host = source_url
        .and_then(|u| Url::parse(u).ok())
        .and_then(|u| u.host_str().map(sanitize_filename_part))
        .filter(|s| !s.is_empty());
    let from_file = || {
        input
            .and_then(|p| p.file_stem())
            .map(|s| sanitize_filename_part(&s.to_string_lossy()))
            .filter(|s| !s.is_empty())
    };
    from_host
        .or_else(from_file)
        .unwrap_or_else(|| FALLBACK_STEM.to_string())
}

/// Output path for one artifact.
///
/// An existing directory (or a path ending in a separator) receives the
/// default file name. Any other `out` is taken literally when it is the only
/// artifact; with several artifacts they go next to it instead.
pub fn resolve_artifact_path(
    out: Option<&Path>,
    stem: &str,
    kind: ArtifactKind,
    single: bool,
) -> PathBuf {
    let name = kind.file_name(stem);
    let Some(out) = out else {
        return PathBuf::from(name);
    };
    let names_dir = out.is_dir() || out.as_os_str().to_string_lossy().ends_with(std::path::MAIN_SEPARATOR);
    if names_dir {
        return out.join(name);
    }
    if single {
        return out.to_path_buf();
    }
    match out.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
        _ => PathBuf::from(name),
    }
}

/// Write through `<path>.tmp` and rename into place.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

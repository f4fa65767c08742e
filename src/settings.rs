use std::path::Path;

use dte_lib::{Config, DteError, ExtractionParams};

/// `--fast` never reports more sampled elements than this.
pub const FAST_MAX_ELEMENTS: u32 = 700;

/// Tracks which CLI flags were explicitly provided vs. defaulted.
#[derive(Debug, Default)]
pub struct ExtractFlagSources {
    pub max_elements: bool,
    pub no_interactions: bool,
}

impl ExtractFlagSources {
    pub fn from_args(args: &[String]) -> Self {
        Self {
            max_elements: flag_present(args, "--max-elements"),
            no_interactions: flag_present(args, "--no-interactions"),
        }
    }
}

/// Checks if a flag was present in the command-line arguments.
pub fn flag_present(args: &[String], flag: &str) -> bool {
    args.iter()
        .any(|arg| arg == flag || arg.starts_with(&format!("{flag}=")))
}

/// Merge CLI arguments with config file, preferring CLI when flags are present.
/// `--fast` applies last.
pub fn resolve_extraction_params(
    cli_max_elements: u32,
    fast: bool,
    config: &Config,
    flags: &ExtractFlagSources,
) -> ExtractionParams {
    let mut max_elements = if flags.max_elements {
        cli_max_elements
    } else {
        config.max_elements
    };
    let mut interactions_enabled = if flags.no_interactions {
        false
    } else {
        config.interactions
    };
    if fast {
        max_elements = max_elements.min(FAST_MAX_ELEMENTS);
        interactions_enabled = false;
    }
    ExtractionParams {
        max_elements,
        interactions_enabled,
    }
}

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/dte/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, DteError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        tracing::warn!(config = %loc, error = %e, "config file unusable");
        DteError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        DteError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Format effective config as a single-line string.
pub fn format_effective_config(
    params: &ExtractionParams,
    config: &Config,
    config_source: Option<&Path>,
) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    let caps = &config.caps;
    let h = &config.heuristics;
    format!(
        "Effective config [{source}]: max_elements={}, interactions={}, caps: colors={}, gradients={}, shadows={}, typography={}, transitions={}, animations={}, spacing={}, radii={}, keyframes={}, heuristics: event_weight={}, shadow_px={}, grid={:?}, radius_full={}",
        params.max_elements,
        params.interactions_enabled,
        caps.colors,
        caps.gradients,
        caps.shadows,
        caps.typography,
        caps.transitions,
        caps.animations,
        caps.spacing,
        caps.radii,
        caps.keyframes,
        h.motion_event_weight,
        h.shadow_min_px_lengths,
        h.spacing_grid_bases,
        h.radius_full_threshold,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flag_present_matches_plain_and_equals_forms() {
        let raw = args(&["dte", "extract", "--max-elements=10", "--no-interactions"]);
        assert!(flag_present(&raw, "--max-elements"));
        assert!(flag_present(&raw, "--no-interactions"));
        assert!(!flag_present(&raw, "--fast"));
    }

    #[test]
    fn resolve_prefers_config_when_flags_absent() {
        let cfg = Config {
            max_elements: 1234,
            interactions: false,
            ..Config::default()
        };
        let params = resolve_extraction_params(2000, false, &cfg, &ExtractFlagSources::default());
        assert_eq!(params.max_elements, 1234);
        assert!(!params.interactions_enabled);
    }

    #[test]
    fn resolve_prefers_cli_when_flags_present() {
        let flags = ExtractFlagSources {
            max_elements: true,
            no_interactions: true,
        };
        let params = resolve_extraction_params(50, false, &Config::default(), &flags);
        assert_eq!(params.max_elements, 50);
        assert!(!params.interactions_enabled);
    }

    #[test]
    fn fast_caps_elements_and_disables_interactions() {
        let params =
            resolve_extraction_params(2000, true, &Config::default(), &ExtractFlagSources::default());
        assert_eq!(params.max_elements, FAST_MAX_ELEMENTS);
        assert!(!params.interactions_enabled);

        let flags = ExtractFlagSources {
            max_elements: true,
            no_interactions: false,
        };
        let params = resolve_extraction_params(300, true, &Config::default(), &flags);
        assert_eq!(params.max_elements, 300);
    }

    #[test]
    fn load_config_reads_explicit_file() {
        let mut file = NamedTempFile::new().expect("temp config");
        writeln!(file, "max_elements = 900\n[caps]\ncolors = 8").expect("write config");
        let cfg = load_config(Some(file.path())).expect("load");
        assert_eq!(cfg.max_elements, 900);
        assert_eq!(cfg.caps.colors, 8);
    }

    #[test]
    fn load_config_rejects_invalid_values() {
        let mut file = NamedTempFile::new().expect("temp config");
        writeln!(file, "[caps]\ncolors = 0").expect("write config");
        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Invalid config"), "got: {err}");
        assert!(err.to_string().contains("caps.colors"));
    }

    #[test]
    fn load_config_reports_missing_explicit_file() {
        let err = load_config(Some(Path::new("/no/such/dte.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config /no/such/dte.toml"));
    }

    #[test]
    fn format_effective_config_includes_key_fields() {
        let summary = format_effective_config(
            &ExtractionParams {
                max_elements: 700,
                interactions_enabled: false,
            },
            &Config::default(),
            Some(Path::new("dte.toml")),
        );
        assert!(summary.contains("max_elements=700"));
        assert!(summary.contains("interactions=false"));
        assert!(summary.contains("colors=60"));
        assert!(summary.contains("event_weight=3"));
        assert!(summary.contains("grid=[4, 8]"));
        assert!(summary.contains("dte.toml"));
    }
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const APP_DIR: &str = "dte";
const APP_CONFIG_FILE: &str = "config.toml";

/// Engine and sampler defaults, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_elements: u32,
    pub interactions: bool,
    pub caps: RankingCaps,
    pub heuristics: Heuristics,
}

/// Per-category Top-N limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingCaps {
    pub colors: usize,
    pub gradients: usize,
    pub shadows: usize,
    pub typography: usize,
    pub transitions: usize,
    pub animations: usize,
    pub spacing: usize,
    pub radii: usize,
    pub keyframes: usize,
    pub motion_events_sample: usize,
}

impl Default for RankingCaps {
    fn default() -> Self {
        Self {
            colors: 60,
            gradients: 20,
            shadows: 20,
            typography: 30,
            transitions: 30,
            animations: 30,
            spacing: 30,
            radii: 20,
            keyframes: 200,
            motion_events_sample: 50,
        }
    }
}

/// Empirically tuned classification and scale thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// Count weight of a transition/animation observed firing during interaction.
    pub motion_event_weight: u64,
    /// Minimum number of `<n>px` lengths for a value to read as a shadow.
    pub shadow_min_px_lengths: usize,
    /// Spacing values all divisible by one of these switch to ordinal labels.
    pub spacing_grid_bases: Vec<u32>,
    /// Radii at or above this value are placed in the `full` slot.
    pub radius_full_threshold: f64,
    pub font_scale_steps: usize,
    pub spacing_scale_steps: usize,
    pub radius_scale_steps: usize,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            motion_event_weight: 3,
            shadow_min_px_lengths: 2,
            spacing_grid_bases: vec![4, 8],
            radius_full_threshold: 100.0,
            font_scale_steps: 10,
            spacing_scale_steps: 12,
            radius_scale_steps: 8,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_elements: 2000,
            interactions: true,
            caps: RankingCaps::default(),
            heuristics: Heuristics::default(),
        }
    }
}

impl Config {
    /// Load from an explicit path, then the central config file, then defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let candidate = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::central_config_path().filter(|p| p.exists()),
        };
        let Some(file) = candidate else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(&file).map_err(|e| e.to_string())?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    /// `$XDG_CONFIG_HOME/dte/config.toml`, falling back to `~/.config/dte/config.toml`.
    pub fn central_config_path() -> Option<PathBuf> {
        let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
        let home = std::env::var_os("HOME").map(PathBuf::from);
        config_root(xdg.as_deref(), home.as_deref()).map(|root| root.join(APP_DIR).join(APP_CONFIG_FILE))
    }

    pub fn validate(&self) -> Result<(), String> {
        let caps = &self.caps;
        let named = [
            ("colors", caps.colors),
            ("gradients", caps.gradients),
            ("shadows", caps.shadows),
            ("typography", caps.typography),
            ("transitions", caps.transitions),
            ("animations", caps.animations),
            ("spacing", caps.spacing),
            ("radii", caps.radii),
        ];
        if let Some((name, _)) = named.iter().find(|(_, cap)| *cap == 0) {
            return Err(format!("caps.{name} must be greater than zero"));
        }
        if self.max_elements == 0 {
            return Err("max_elements must be greater than zero".to_string());
        }

        let h = &self.heuristics;
        if h.motion_event_weight == 0 {
            return Err("heuristics.motion_event_weight must be greater than zero".to_string());
        }
        if h.spacing_grid_bases.is_empty() || h.spacing_grid_bases.contains(&0) {
            return Err("heuristics.spacing_grid_bases must be non-empty and non-zero".to_string());
        }
        if !h.radius_full_threshold.is_finite() || h.radius_full_threshold <= 0.0 {
            return Err("heuristics.radius_full_threshold must be a positive number".to_string());
        }
        check_steps("font_scale_steps", h.font_scale_steps, crate::tokens::FONT_SIZE_LABELS.len())?;
        check_steps(
            "spacing_scale_steps",
            h.spacing_scale_steps,
            crate::tokens::SPACING_LABELS.len(),
        )?;
        check_steps("radius_scale_steps", h.radius_scale_steps, crate::tokens::RADIUS_LABELS.len())?;
        Ok(())
    }
}

fn check_steps(name: &str, steps: usize, max: usize) -> Result<(), String> {
    if steps == 0 || steps > max {
        return Err(format!("heuristics.{name} must be between 1 and {max}"));
    }
    Ok(())
}

fn config_root(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    if let Some(xdg) = xdg_config_home.filter(|p| !p.as_os_str().is_empty()) {
        return Some(xdg.to_path_buf());
    }
    home.map(|h| h.join(".config"))
}

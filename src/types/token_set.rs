//! The aggregated design token set.
//!
//! Key names and nesting are consumed by the stylesheet and Tailwind
//! exporters (`tokens.color.semantic`, `tokens.*.scale`, ...), so the serde
//! layout here is part of the output contract.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::capture::{AnimationTuple, KeyframeDefinition, MotionEvent, TransitionTuple, TypographyTuple};

/// A ranked value and its (weighted) occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry<T> {
    pub value: T,
    pub count: u64,
}

/// Label -> value, in label order. Empty when no input qualified.
pub type Scale = IndexMap<String, String>;

/// Role name -> original-format color. Roles without a match are absent.
pub type SemanticColors = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSet {
    pub meta: TokenMeta,
    pub tokens: Tokens,
    pub debug: DebugInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMeta {
    /// Source identifier, usually the sampled page URL.
    pub url: String,
    pub extracted_at: DateTime<Utc>,
    pub max_elements: u32,
    pub interactions_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tokens {
    pub color: ColorTokens,
    pub typography: TypographyTokens,
    pub spacing: ScaleTokens,
    pub border_radius: ScaleTokens,
    pub motion: MotionTokens,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorTokens {
    pub root_variables: IndexMap<String, String>,
    pub semantic: SemanticColors,
    pub solid: Vec<RankedEntry<String>>,
    pub gradients: Vec<RankedEntry<String>>,
    pub shadows: Vec<RankedEntry<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypographyTokens {
    pub scale: Scale,
    pub sampled: Vec<RankedEntry<TypographyTuple>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleTokens {
    pub scale: Scale,
    pub sampled: Vec<RankedEntry<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionTokens {
    pub transitions: Vec<RankedEntry<TransitionTuple>>,
    pub animations: Vec<RankedEntry<AnimationTuple>>,
    pub keyframes: Vec<KeyframeDefinition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub root_variables_other: IndexMap<String, String>,
    pub motion_events_sample: Vec<MotionEvent>,
}

impl TokenSet {
    /// Short per-category counts for status output.
    pub fn summary(&self) -> TokenSummary {
        let t = &self.tokens;
        TokenSummary {
            root_variables: t.color.root_variables.len(),
            semantic_roles: t.color.semantic.len(),
            solid_colors: t.color.solid.len(),
            gradients: t.color.gradients.len(),
            shadows: t.color.shadows.len(),
            typography_styles: t.typography.sampled.len(),
            font_size_steps: t.typography.scale.len(),
            spacing_steps: t.spacing.scale.len(),
            radius_steps: t.border_radius.scale.len(),
            transitions: t.motion.transitions.len(),
            animations: t.motion.animations.len(),
            keyframes: t.motion.keyframes.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSummary {
    pub root_variables: usize,
    pub semantic_roles: usize,
    pub solid_colors: usize,
    pub gradients: usize,
    pub shadows: usize,
    pub typography_styles: usize,
    pub font_size_steps: usize,
    pub spacing_steps: usize,
    pub radius_steps: usize,
    pub transitions: usize,
    pub animations: usize,
    pub keyframes: usize,
}

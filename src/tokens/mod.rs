//! Token aggregation engine.
//!
//! Turns raw per-element style samples into a ranked, de-duplicated token set:
//! - [`normalize`] - canonical keys and color/gradient/shadow classification
//! - [`color_science`] - RGB parsing, HSL and WCAG luminance
//! - [`frequency`] - weighted counting and Top-N ranking
//! - [`semantic`] - role inference over the ranked palette
//! - [`scale`] - font-size, spacing and radius scales
//! - [`aggregate`] - the orchestrator tying the stages together

pub mod aggregate;
pub mod color_science;
pub mod frequency;
pub mod normalize;
pub mod scale;
pub mod semantic;


pub use aggregate::{aggregate, split_root_variables, AggregationContext};
pub use color_science::{
    parse_rgb_components, relative_luminance, rgb_to_hsl, ColorProfile, HslColor, Rgba,
};
pub use frequency::{FrequencyTable, OriginalSpellings, STATIC_WEIGHT};
pub use normalize::{
    categorize_color, is_color_value, is_gradient_value, is_shadow_value, normalize_color_string,
    normalize_whitespace, parse_numeric_value, ColorCategory, LengthUnit, NumericValue,
    ValueClassifier,
};
pub use scale::{
    build_font_size_scale, build_radius_scale, build_spacing_scale, merge_numeric, MergedValue,
    FONT_SIZE_LABELS, RADIUS_LABELS, SPACING_LABELS,
};
pub use semantic::{infer_semantic_roles, resolve_colors, ResolvedColor, SemanticRole};

//! One pass over a raw extraction, producing the final [`TokenSet`].

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::config::Config;
use crate::types::{
    AnimationTuple, ColorTokens, CssValue, DebugInfo, ExtractionParams, MotionEvent,
    MotionEventLog, MotionTokens, RankedEntry, RawExtraction, ScaleTokens, TokenMeta, TokenSet,
    Tokens, TransitionTuple, TypographyTokens, TypographyTuple,
};

use super::frequency::{FrequencyTable, OriginalSpellings, STATIC_WEIGHT};
use super::normalize::{
    is_color_value, normalize_color_string, normalize_whitespace, ColorCategory, ValueClassifier,
    CURRENT_COLOR,
};
use super::scale::{build_font_size_scale, build_radius_scale, build_spacing_scale};
use super::semantic::{infer_semantic_roles, resolve_colors};

/// Spacing keywords that never become scale steps.
const SPACING_SKIP: [&str; 4] = ["0", "0px", "auto", "normal"];

/// Caller-supplied metadata echoed into [`TokenMeta`].
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationContext {
    pub url: String,
    pub extracted_at: DateTime<Utc>,
    pub params: ExtractionParams,
}

impl AggregationContext {
    pub fn new(url: impl Into<String>, extracted_at: DateTime<Utc>) -> Self {
        Self {
            url: url.into(),
            extracted_at,
            params: ExtractionParams::default(),
        }
    }

    pub fn with_params(mut self, params: ExtractionParams) -> Self {
        self.params = params;
        self
    }
}

fn css(value: &CssValue) -> CssValue {
    CssValue::new(normalize_whitespace(value.as_str()))
}

fn typography_key(t: &TypographyTuple) -> Option<TypographyTuple> {
    let key = TypographyTuple {
        font_family: css(&t.font_family),
        font_size: css(&t.font_size),
        font_weight: css(&t.font_weight),
        font_style: css(&t.font_style),
        line_height: css(&t.line_height),
        letter_spacing: css(&t.letter_spacing),
        text_transform: css(&t.text_transform),
    };
    (key != TypographyTuple::default()).then_some(key)
}

/// Normalized transition key; `None` for an empty or `none` tuple.
fn transition_key(t: &TransitionTuple) -> Option<TransitionTuple> {
    let key = TransitionTuple {
        transition_property: css(&t.transition_property),
        transition_duration: css(&t.transition_duration),
        transition_timing_function: css(&t.transition_timing_function),
        transition_delay: css(&t.transition_delay),
    };
    let rest_empty = key.transition_duration.is_empty()
        && key.transition_timing_function.is_empty()
        && key.transition_delay.is_empty();
    let property = key.transition_property.as_str();
    if rest_empty && (property.is_empty() || property == "none") {
        return None;
    }
    Some(key)
}

/// Normalized animation key; `None` for an empty tuple or `animation-name: none`.
fn animation_key(a: &AnimationTuple) -> Option<AnimationTuple> {
    let key = AnimationTuple {
        animation_name: css(&a.animation_name),
        animation_duration: css(&a.animation_duration),
        animation_timing_function: css(&a.animation_timing_function),
        animation_delay: css(&a.animation_delay),
        animation_iteration_count: css(&a.animation_iteration_count),
        animation_direction: css(&a.animation_direction),
        animation_fill_mode: css(&a.animation_fill_mode),
        animation_play_state: css(&a.animation_play_state),
    };
    if key == AnimationTuple::default() || key.animation_name.as_str() == "none" {
        return None;
    }
    Some(key)
}

fn length_key(value: &CssValue, skip: &[&str]) -> Option<String> {
    let v = normalize_whitespace(value.as_str());
    (!v.is_empty() && !skip.contains(&v.as_str())).then_some(v)
}

/// Root variables split into (color, other), values trimmed, page order kept.
pub fn split_root_variables(
    root_vars: &IndexMap<String, CssValue>,
) -> (IndexMap<String, String>, IndexMap<String, String>) {
    let mut colors = IndexMap::new();
    let mut other = IndexMap::new();
    for (name, value) in root_vars {
        let is_color = normalize_color_string(value.as_str())
            .is_some_and(|n| n != CURRENT_COLOR && is_color_value(&n));
        let target = if is_color { &mut colors } else { &mut other };
        target.insert(name.clone(), value.as_str().trim().to_string());
    }
    (colors, other)
}

/// Working tables for one aggregation run.
struct Tally {
    classifier: ValueClassifier,
    spellings: OriginalSpellings,
    solid: FrequencyTable<String>,
    gradients: FrequencyTable<String>,
    shadows: FrequencyTable<String>,
    typography: FrequencyTable<TypographyTuple>,
    transitions: FrequencyTable<TransitionTuple>,
    animations: FrequencyTable<AnimationTuple>,
    spacing: FrequencyTable<String>,
    radii: FrequencyTable<String>,
}

impl Tally {
    fn new(classifier: ValueClassifier) -> Self {
        Self {
            classifier,
            spellings: OriginalSpellings::new(),
            solid: FrequencyTable::new(),
            gradients: FrequencyTable::new(),
            shadows: FrequencyTable::new(),
            typography: FrequencyTable::new(),
            transitions: FrequencyTable::new(),
            animations: FrequencyTable::new(),
            spacing: FrequencyTable::new(),
            radii: FrequencyTable::new(),
        }
    }

    fn add_color(&mut self, raw: &CssValue) {
        let Some(key) = normalize_color_string(raw.as_str()) else {
            return;
        };
        let table = match self.classifier.categorize(&key) {
            ColorCategory::Color => &mut self.solid,
            ColorCategory::Gradient => &mut self.gradients,
            ColorCategory::Shadow => &mut self.shadows,
            ColorCategory::Other => {
                tracing::trace!(value = %raw.as_str(), "not a color, gradient or shadow");
                return;
            }
        };
        table.add(Some(key.clone()), STATIC_WEIGHT);
        self.spellings.record(&key, raw.as_str());
    }

    fn count_samples(&mut self, extraction: &RawExtraction) {
        let samples = &extraction.samples;

        for sample in &samples.colors {
            for value in sample.colors.values() {
                self.add_color(value);
            }
            self.add_color(&sample.shadows.box_shadow);
            self.add_color(&sample.shadows.text_shadow);
        }

        for t in &samples.typography {
            self.typography.add(typography_key(t), STATIC_WEIGHT);
        }

        for m in &samples.motion {
            self.transitions.add(transition_key(&m.transition), STATIC_WEIGHT);
            self.animations.add(animation_key(&m.animation), STATIC_WEIGHT);
        }

        for s in &samples.spacing {
            for value in s.values() {
                self.spacing.add(length_key(value, &SPACING_SKIP), STATIC_WEIGHT);
            }
        }

        for s in &samples.sizing {
            for value in s.radii() {
                self.radii.add(length_key(value, &SPACING_SKIP[..2]), STATIC_WEIGHT);
            }
        }
    }

    fn count_motion_events(&mut self, events: &MotionEventLog, weight: u64) {
        for event in events.iter() {
            match event {
                MotionEvent::Transition {
                    computed: Some(t), ..
                } => self.transitions.add(transition_key(t), weight),
                MotionEvent::Animation {
                    computed: Some(a), ..
                } => self.animations.add(animation_key(a), weight),
                _ => {}
            }
        }
    }
}

/// Reduce one extraction and its motion events into a token set.
///
/// Pure: the same inputs always produce the same output. Unparsable values
/// are dropped from the stage that cannot use them, so aggregation cannot
/// fail once a capture has decoded.
pub fn aggregate(
    extraction: &RawExtraction,
    motion_events: &MotionEventLog,
    context: &AggregationContext,
    config: &Config,
) -> TokenSet {
    let caps = &config.caps;
    let heuristics = &config.heuristics;

    let (root_colors, root_other) = split_root_variables(&extraction.root_vars);
    tracing::debug!(
        colors = root_colors.len(),
        other = root_other.len(),
        "split root variables"
    );

    let mut tally = Tally::new(ValueClassifier {
        shadow_min_px_lengths: heuristics.shadow_min_px_lengths,
    });
    tally.count_samples(extraction);
    tally.count_motion_events(motion_events, heuristics.motion_event_weight);
    tracing::debug!(
        solid = tally.solid.len(),
        gradients = tally.gradients.len(),
        shadows = tally.shadows.len(),
        typography = tally.typography.len(),
        transitions = tally.transitions.len(),
        animations = tally.animations.len(),
        spacing = tally.spacing.len(),
        radii = tally.radii.len(),
        events = motion_events.len(),
        "counted samples"
    );

    let solid = tally.spellings.restore(tally.solid.top_n(caps.colors));
    let gradients = tally.spellings.restore(tally.gradients.top_n(caps.gradients));
    let shadows = tally.spellings.restore(tally.shadows.top_n(caps.shadows));
    let typography = tally.typography.top_n(caps.typography);
    let transitions = tally.transitions.top_n(caps.transitions);
    let animations = tally.animations.top_n(caps.animations);
    let spacing = tally.spacing.top_n(caps.spacing);
    let radii = tally.radii.top_n(caps.radii);

    let resolved = resolve_colors(&solid);
    let semantic = infer_semantic_roles(&resolved);
    tracing::debug!(
        resolved = resolved.len(),
        roles = semantic.len(),
        "inferred semantic colors"
    );

    let font_sizes: Vec<RankedEntry<String>> = typography
        .iter()
        .map(|entry| RankedEntry {
            value: entry.value.font_size.as_str().to_string(),
            count: entry.count,
        })
        .collect();
    let font_scale = build_font_size_scale(&font_sizes, heuristics);
    let spacing_scale = build_spacing_scale(&spacing, heuristics);
    let radius_scale = build_radius_scale(&radii, heuristics);
    tracing::debug!(
        font_sizes = font_scale.len(),
        spacing = spacing_scale.len(),
        radii = radius_scale.len(),
        "built scales"
    );

    let keyframes = extraction
        .keyframes
        .iter()
        .take(caps.keyframes)
        .cloned()
        .collect();
    let motion_events_sample = motion_events
        .iter()
        .take(caps.motion_events_sample)
        .cloned()
        .collect();

    TokenSet {
        meta: TokenMeta {
            url: context.url.clone(),
            extracted_at: context.extracted_at,
            max_elements: context.params.max_elements,
            interactions_enabled: context.params.interactions_enabled,
        },
        tokens: Tokens {
            color: ColorTokens {
                root_variables: root_colors,
                semantic,
                solid,
                gradients,
                shadows,
            },
            typography: TypographyTokens {
                scale: font_scale,
                sampled: typography,
            },
            spacing: ScaleTokens {
                scale: spacing_scale,
                sampled: spacing,
            },
            border_radius: ScaleTokens {
                scale: radius_scale,
                sampled: radii,
            },
            motion: MotionTokens {
                transitions,
                animations,
                keyframes,
            },
        },
        debug: DebugInfo {
            root_variables_other: root_other,
            motion_events_sample,
        },
    }
}

//! Semantic color roles inferred from the frequency-ranked palette.
//!
//! Each role scans the ranked list independently and takes the first color
//! that satisfies its predicate, so a frequent color can fill several roles.
//! A role with no match is left out of the map.

use std::fmt;

use crate::types::{RankedEntry, SemanticColors};

use super::color_science::ColorProfile;
use super::normalize::normalize_color_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticRole {
    Primary,
    Secondary,
    Accent,
    Background,
    Text,
    Border,
    Success,
    Error,
    Warning,
    Info,
}

impl SemanticRole {
    pub const ALL: [SemanticRole; 10] = [
        SemanticRole::Primary,
        SemanticRole::Secondary,
        SemanticRole::Accent,
        SemanticRole::Background,
        SemanticRole::Text,
        SemanticRole::Border,
        SemanticRole::Success,
        SemanticRole::Error,
        SemanticRole::Warning,
        SemanticRole::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticRole::Primary => "primary",
            SemanticRole::Secondary => "secondary",
            SemanticRole::Accent => "accent",
            SemanticRole::Background => "background",
            SemanticRole::Text => "text",
            SemanticRole::Border => "border",
            SemanticRole::Success => "success",
            SemanticRole::Error => "error",
            SemanticRole::Warning => "warning",
            SemanticRole::Info => "info",
        }
    }
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ranked color that parsed into RGB.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColor {
    /// Original-format spelling, as emitted.
    pub value: String,
    pub count: u64,
    pub profile: ColorProfile,
}

impl ResolvedColor {
    fn saturation(&self) -> f64 {
        self.profile.hsl.saturation
    }

    fn lightness(&self) -> f64 {
        self.profile.hsl.lightness
    }

    fn hue(&self) -> f64 {
        self.profile.hsl.hue
    }

    fn hue_in(&self, lo: f64, hi: f64) -> bool {
        (lo..=hi).contains(&self.hue())
    }

    fn is(&self, other: Option<&ResolvedColor>) -> bool {
        other.is_some_and(|o| o.value == self.value)
    }
}

/// Resolve ranked colors to RGB/HSL/luminance, dropping what does not parse.
pub fn resolve_colors(ranked: &[RankedEntry<String>]) -> Vec<ResolvedColor> {
    ranked
        .iter()
        .filter_map(|entry| {
            let key = normalize_color_string(&entry.value)?;
            match ColorProfile::from_css(&key) {
                Some(profile) => Some(ResolvedColor {
                    value: entry.value.clone(),
                    count: entry.count,
                    profile,
                }),
                None => {
                    tracing::trace!(value = %entry.value, "color not resolvable to rgb; skipped for roles");
                    None
                }
            }
        })
        .collect()
}

pub fn infer_semantic_roles(colors: &[ResolvedColor]) -> SemanticColors {
    let first = |pred: &dyn Fn(&ResolvedColor) -> bool| colors.iter().find(|c| pred(c));

    let primary = first(&|c| c.saturation() > 15.0 || c.lightness() < 20.0 || c.lightness() > 80.0)
        .or_else(|| colors.first());
    let secondary = first(&|c| {
        !c.is(primary) && (c.saturation() > 10.0 || c.lightness() < 30.0 || c.lightness() > 70.0)
    });
    let accent = first(&|c| {
        !c.is(primary)
            && !c.is(secondary)
            && c.saturation() > 50.0
            && c.lightness() > 25.0
            && c.lightness() < 75.0
    });
    let background = first(&|c| c.profile.luminance > 0.85);
    let text = first(&|c| c.profile.luminance < 0.15);
    let border = first(&|c| {
        c.saturation() < 15.0 && c.lightness() > 40.0 && c.lightness() < 85.0 && !c.is(background)
    });
    let success = first(&|c| c.hue_in(90.0, 150.0) && c.saturation() > 30.0);
    // the saturation floor only guards the upper red band
    let error = first(&|c| c.hue_in(0.0, 20.0) || (c.hue_in(340.0, 360.0) && c.saturation() > 40.0));
    let warning = first(&|c| c.hue_in(25.0, 55.0) && c.saturation() > 40.0);
    let info = first(&|c| {
        !c.is(primary) && !c.is(secondary) && c.hue_in(190.0, 250.0) && c.saturation() > 30.0
    });

    let assigned = [
        (SemanticRole::Primary, primary),
        (SemanticRole::Secondary, secondary),
        (SemanticRole::Accent, accent),
        (SemanticRole::Background, background),
        (SemanticRole::Text, text),
        (SemanticRole::Border, border),
        (SemanticRole::Success, success),
        (SemanticRole::Error, error),
        (SemanticRole::Warning, warning),
        (SemanticRole::Info, info),
    ];

    assigned
        .into_iter()
        .filter_map(|(role, color)| color.map(|c| (role.as_str().to_string(), c.value.clone())))
        .collect()
}

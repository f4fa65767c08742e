//! Canonical forms and categories for raw computed-style strings.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static PUNCTUATION_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*,\s*|\(\s+|\s+\)").expect("punctuation pattern is valid"));
static PX_LENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+px").expect("px pattern is valid"));
static NUMERIC_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\d.]+)(px|rem|em|%)?$").expect("numeric pattern is valid")
});

/// Values that carry no token information.
const EMPTY_KEYWORDS: [&str; 4] = ["transparent", "initial", "inherit", "unset"];

pub const CURRENT_COLOR: &str = "currentcolor";

/// Collapse whitespace runs to one space and trim.
pub fn normalize_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

/// Canonical key for color-like values.
///
/// Lower-cases, collapses whitespace and drops whitespace around commas and
/// inside parentheses, so `RGB(255, 0, 0)` and `rgb(255,0,0)` share a key.
/// Returns `None` for empty and CSS-wide keywords.
pub fn normalize_color_string(v: &str) -> Option<String> {
    let collapsed = normalize_whitespace(v).to_lowercase();
    let s = PUNCTUATION_SPACING
        .replace_all(&collapsed, |caps: &Captures| caps[0].trim().to_string())
        .into_owned();
    if s.is_empty() || EMPTY_KEYWORDS.contains(&s.as_str()) {
        return None;
    }
    if s == CURRENT_COLOR {
        return Some(CURRENT_COLOR.to_string());
    }
    Some(s)
}

pub fn is_color_value(s: &str) -> bool {
    let t = s.trim().to_lowercase();
    t.starts_with("rgb(")
        || t.starts_with("rgba(")
        || t.starts_with('#')
        || t.contains("hsl(")
        || t.contains("hsla(")
        || t == CURRENT_COLOR
}

pub fn is_gradient_value(s: &str) -> bool {
    let t = s.trim().to_lowercase();
    t.starts_with("url(") || t.starts_with("linear-gradient") || t.starts_with("radial-gradient")
}

/// Which frequency table a color-ish value is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCategory {
    Color,
    Gradient,
    Shadow,
    Other,
}

impl fmt::Display for ColorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorCategory::Color => "color",
            ColorCategory::Gradient => "gradient",
            ColorCategory::Shadow => "shadow",
            ColorCategory::Other => "other",
        })
    }
}

/// Value classification with its tunable shadow threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueClassifier {
    pub shadow_min_px_lengths: usize,
}

impl Default for ValueClassifier {
    fn default() -> Self {
        Self {
            shadow_min_px_lengths: 2,
        }
    }
}

impl ValueClassifier {
    /// An rgb/rgba color plus at least `shadow_min_px_lengths` pixel lengths
    /// (offsets, blur, spread).
    pub fn is_shadow(&self, s: &str) -> bool {
        let t = s.to_lowercase();
        if !(t.contains("rgb(") || t.contains("rgba(")) {
            return false;
        }
        PX_LENGTH.find_iter(&t).count() >= self.shadow_min_px_lengths
    }

    /// Gradient wins over shadow, shadow over plain color.
    pub fn categorize(&self, v: &str) -> ColorCategory {
        if is_gradient_value(v) {
            ColorCategory::Gradient
        } else if self.is_shadow(v) {
            ColorCategory::Shadow
        } else if is_color_value(v) {
            ColorCategory::Color
        } else {
            ColorCategory::Other
        }
    }
}

pub fn is_shadow_value(s: &str) -> bool {
    ValueClassifier::default().is_shadow(s)
}

pub fn categorize_color(v: &str) -> ColorCategory {
    ValueClassifier::default().categorize(v)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    #[serde(rename = "px")]
    Px,
    #[serde(rename = "rem")]
    Rem,
    #[serde(rename = "em")]
    Em,
    #[serde(rename = "%")]
    Percent,
}

impl LengthUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            LengthUnit::Px => "px",
            LengthUnit::Rem => "rem",
            LengthUnit::Em => "em",
            LengthUnit::Percent => "%",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericValue {
    pub number: f64,
    pub unit: LengthUnit,
    pub original: String,
}

/// Parse a bare `<number><unit>?` token. Unit defaults to px; anything else
/// (`auto`, `calc(...)`, multi-value shorthands, negatives) is `None`.
pub fn parse_numeric_value(v: &str) -> Option<NumericValue> {
    let original = v.trim();
    let caps = NUMERIC_TOKEN.captures(original)?;
    let number: f64 = caps[1].parse().ok()?;
    let unit = match caps.get(2).map(|m| m.as_str()) {
        None | Some("px") => LengthUnit::Px,
        Some("rem") => LengthUnit::Rem,
        Some("em") => LengthUnit::Em,
        Some(_) => LengthUnit::Percent,
    };
    Some(NumericValue {
        number,
        unit,
        original: original.to_string(),
    })
}

//! RGB parsing, HSL conversion and WCAG relative luminance.

use std::sync::LazyLock;

use palette::{convert::FromColorUnclamped, Hsl, Srgb};
use regex::Regex;

static RGB_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rgb\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)").expect("rgb pattern is valid")
});
static RGBA_FN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rgba\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*,\s*([\d.]+)\s*\)")
        .expect("rgba pattern is valid")
});
static HEX6: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^#([0-9a-f]{2})([0-9a-f]{2})([0-9a-f]{2})$").expect("hex6 pattern is valid")
});
static HEX3: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^#([0-9a-f])([0-9a-f])([0-9a-f])$").expect("hex3 pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

/// Hue in degrees `[0, 360)`, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

/// Everything role inference needs to know about one color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorProfile {
    pub rgb: Rgba,
    pub hsl: HslColor,
    pub luminance: f64,
}

impl ColorProfile {
    pub fn from_css(s: &str) -> Option<Self> {
        let rgb = parse_rgb_components(s)?;
        Some(Self {
            rgb,
            hsl: rgb_to_hsl(rgb.r, rgb.g, rgb.b),
            luminance: relative_luminance(rgb.r, rgb.g, rgb.b),
        })
    }
}

fn channel(s: &str) -> Option<u8> {
    s.parse::<u32>().ok().map(|v| v.min(255) as u8)
}

fn hex_channel(s: &str) -> Option<u8> {
    u8::from_str_radix(s, 16).ok()
}

/// `rgb()`, `rgba()`, `#rrggbb`, `#rgb`, in that order. Named colors and
/// `hsl()` are not resolved.
pub fn parse_rgb_components(s: &str) -> Option<Rgba> {
    let s = s.trim();

    if let Some(c) = RGB_FN.captures(s) {
        return Some(Rgba {
            r: channel(&c[1])?,
            g: channel(&c[2])?,
            b: channel(&c[3])?,
            a: 1.0,
        });
    }
    if let Some(c) = RGBA_FN.captures(s) {
        return Some(Rgba {
            r: channel(&c[1])?,
            g: channel(&c[2])?,
            b: channel(&c[3])?,
            a: c[4].parse::<f64>().ok()?.clamp(0.0, 1.0),
        });
    }
    if let Some(c) = HEX6.captures(s) {
        return Some(Rgba {
            r: hex_channel(&c[1])?,
            g: hex_channel(&c[2])?,
            b: hex_channel(&c[3])?,
            a: 1.0,
        });
    }
    if let Some(c) = HEX3.captures(s) {
        let doubled = |d: &str| hex_channel(&d.repeat(2));
        return Some(Rgba {
            r: doubled(&c[1])?,
            g: doubled(&c[2])?,
            b: doubled(&c[3])?,
            a: 1.0,
        });
    }
    None
}

pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> HslColor {
    let srgb = Srgb::new(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
    );
    let hsl: Hsl<palette::encoding::Srgb, f64> = Hsl::from_color_unclamped(srgb);
    let mut hue = hsl.hue.into_positive_degrees();
    if hue >= 360.0 {
        hue -= 360.0;
    }
    HslColor {
        hue,
        saturation: hsl.saturation * 100.0,
        lightness: hsl.lightness * 100.0,
    }
}

fn linearize(channel: u8) -> f64 {
    let v = f64::from(channel) / 255.0;
    if v <= 0.03928 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance in `[0, 1]`.
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

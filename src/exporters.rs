//! Stylesheet and Tailwind renderings of a [`TokenSet`].

use std::fmt::Write as FmtWrite;

use chrono::SecondsFormat;
use serde_json::{json, Map, Value};

use crate::types::{Scale, TokenSet};
use crate::Result;

/// Solid colors emitted as numbered custom properties.
pub const TOP_COLORS: usize = 10;
/// Shadows emitted by both exporters.
pub const TOP_SHADOWS: usize = 5;
/// Transitions emitted as custom properties.
pub const TOP_TRANSITIONS: usize = 5;

fn generated_at(set: &TokenSet) -> String {
    set.meta
        .extracted_at
        .to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn push_section<I, K, V>(buf: &mut String, title: &str, entries: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: std::fmt::Display,
    V: std::fmt::Display,
{
    let mut body = String::new();
    for (name, value) in entries {
        writeln!(body, "  {name}: {value};").ok();
    }
    if body.is_empty() {
        return;
    }
    writeln!(buf, "  /* {title} */").ok();
    buf.push_str(&body);
    buf.push('\n');
}

fn scale_vars<'a>(prefix: &'a str, scale: &'a Scale) -> impl Iterator<Item = (String, &'a String)> {
    scale
        .iter()
        .map(move |(label, value)| (format!("--{prefix}-{label}"), value))
}

/// `:root { ... }` block of CSS custom properties. Empty sections are left out.
pub fn css_custom_properties(set: &TokenSet) -> String {
    let t = &set.tokens;
    let mut buf = String::new();
    writeln!(buf, "/* Design Tokens - CSS Custom Properties */").ok();
    writeln!(buf, "/* Extracted from: {} */", set.meta.url).ok();
    writeln!(buf, "/* Generated at: {} */", generated_at(set)).ok();
    writeln!(buf).ok();
    writeln!(buf, ":root {{").ok();

    push_section(
        &mut buf,
        "Semantic Colors",
        t.color
            .semantic
            .iter()
            .map(|(role, value)| (format!("--color-{role}"), value)),
    );
    push_section(&mut buf, "Original Root Variables", &t.color.root_variables);
    push_section(
        &mut buf,
        "Top Colors",
        t.color
            .solid
            .iter()
            .take(TOP_COLORS)
            .enumerate()
            .map(|(i, c)| (format!("--color-{}", i + 1), &c.value)),
    );
    push_section(&mut buf, "Font Size Scale", scale_vars("font-size", &t.typography.scale));
    push_section(&mut buf, "Spacing Scale", scale_vars("spacing", &t.spacing.scale));
    push_section(&mut buf, "Border Radius Scale", scale_vars("radius", &t.border_radius.scale));
    push_section(
        &mut buf,
        "Shadows",
        t.color
            .shadows
            .iter()
            .take(TOP_SHADOWS)
            .enumerate()
            .map(|(i, s)| (format!("--shadow-{}", i + 1), &s.value)),
    );
    push_section(
        &mut buf,
        "Transitions",
        t.motion
            .transitions
            .iter()
            .take(TOP_TRANSITIONS)
            .enumerate()
            .map(|(i, entry)| {
                let v = &entry.value;
                let shorthand = [
                    v.transition_property.as_str(),
                    v.transition_duration.as_str(),
                    v.transition_timing_function.as_str(),
                ]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
                (format!("--transition-{}", i + 1), shorthand)
            }),
    );

    // drop the blank line after the last section
    if buf.ends_with("\n\n") {
        buf.pop();
    }
    buf.push_str("}\n");
    buf
}

fn scale_value(scale: &Scale) -> Option<Value> {
    (!scale.is_empty()).then(|| {
        Value::Object(
            scale
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    })
}

/// `tailwind.config.js` extending the theme with the token scales.
pub fn tailwind_config(set: &TokenSet) -> Result<String> {
    let t = &set.tokens;
    let mut extend = Map::new();

    if let Some(colors) = scale_value(&t.color.semantic) {
        extend.insert("colors".to_string(), colors);
    }
    if let Some(sizes) = scale_value(&t.typography.scale) {
        extend.insert("fontSize".to_string(), sizes);
    }
    if let Some(spacing) = scale_value(&t.spacing.scale) {
        extend.insert("spacing".to_string(), spacing);
    }
    if let Some(radii) = scale_value(&t.border_radius.scale) {
        extend.insert("borderRadius".to_string(), radii);
    }
    if !t.color.shadows.is_empty() {
        let shadows: Map<String, Value> = t
            .color
            .shadows
            .iter()
            .take(TOP_SHADOWS)
            .enumerate()
            .map(|(i, s)| (format!("custom-{}", i + 1), Value::String(s.value.clone())))
            .collect();
        extend.insert("boxShadow".to_string(), Value::Object(shadows));
    }

    let config = json!({ "theme": { "extend": extend } });
    let body = serde_json::to_string_pretty(&config)?;

    let mut buf = String::new();
    writeln!(buf, "/** @type {{import('tailwindcss').Config}} */").ok();
    writeln!(buf, "// Design Tokens extracted from: {}", set.meta.url).ok();
    writeln!(buf, "// Generated at: {}", generated_at(set)).ok();
    writeln!(buf).ok();
    writeln!(buf, "module.exports = {body};").ok();
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DebugInfo, RankedEntry, TokenMeta, Tokens, TransitionTuple};
    use chrono::{TimeZone, Utc};

    fn entry(value: &str, count: u64) -> RankedEntry<String> {
        RankedEntry {
            value: value.to_string(),
            count,
        }
    }

    fn token_set(tokens: Tokens) -> TokenSet {
        TokenSet {
            meta: TokenMeta {
                url: "https://example.com/".to_string(),
                extracted_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
                max_elements: 2000,
                interactions_enabled: true,
            },
            tokens,
            debug: DebugInfo::default(),
        }
    }

    fn populated() -> TokenSet {
        let mut t = Tokens::default();
        t.color.semantic.insert("primary".into(), "#3366FF".into());
        t.color.semantic.insert("text".into(), "rgb(17, 24, 39)".into());
        t.color.root_variables.insert("--brand".into(), "#3366ff".into());
        t.color.solid = (0..12).map(|i| entry(&format!("#00000{}", i % 10), 12 - i)).collect();
        t.color.shadows = (0..7)
            .map(|i| entry(&format!("rgba(0, 0, 0, 0.{i}) 0px {i}px 2px"), 1))
            .collect();
        t.typography.scale.insert("md".into(), "14px".into());
        t.spacing.scale.insert("0".into(), "4px".into());
        t.border_radius.scale.insert("full".into(), "9999px".into());
        t.motion.transitions.push(RankedEntry {
            value: TransitionTuple {
                transition_property: "opacity".into(),
                transition_duration: "0.2s".into(),
                transition_timing_function: "ease-in-out".into(),
                transition_delay: "0s".into(),
            },
            count: 3,
        });
        token_set(t)
    }

    #[test]
    fn css_lists_every_section_with_prefixes() {
        let css = css_custom_properties(&populated());

        assert!(css.starts_with("/* Design Tokens - CSS Custom Properties */"));
        assert!(css.contains("/* Extracted from: https://example.com/ */"));
        assert!(css.contains("/* Generated at: 2024-05-01T12:00:00Z */"));
        assert!(css.contains("  --color-primary: #3366FF;"));
        assert!(css.contains("  --brand: #3366ff;"));
        assert!(css.contains("  --color-10: #000009;"));
        assert!(!css.contains("--color-11"));
        assert!(css.contains("  --font-size-md: 14px;"));
        assert!(css.contains("  --spacing-0: 4px;"));
        assert!(css.contains("  --radius-full: 9999px;"));
        assert!(css.contains("  --shadow-5:"));
        assert!(!css.contains("--shadow-6"));
        assert!(css.contains("  --transition-1: opacity 0.2s ease-in-out;"));
        assert!(css.trim_end().ends_with('}'));
    }

    #[test]
    fn css_omits_empty_sections() {
        let css = css_custom_properties(&token_set(Tokens::default()));
        assert!(!css.contains("Semantic Colors"));
        assert!(!css.contains("Shadows"));
        assert!(css.contains(":root {\n}"));
    }

    #[test]
    fn tailwind_extends_theme_with_scales() {
        let js = tailwind_config(&populated()).expect("render");
        assert!(js.starts_with("/** @type {import('tailwindcss').Config} */"));
        assert!(js.contains("// Design Tokens extracted from: https://example.com/"));

        let body = js
            .split_once("module.exports = ")
            .map(|(_, rest)| rest.trim_end().trim_end_matches(';'))
            .expect("module.exports");
        let value: Value = serde_json::from_str(body).expect("json body");
        let extend = &value["theme"]["extend"];
        assert_eq!(extend["colors"]["primary"], "#3366FF");
        assert_eq!(extend["fontSize"]["md"], "14px");
        assert_eq!(extend["spacing"]["0"], "4px");
        assert_eq!(extend["borderRadius"]["full"], "9999px");
        assert_eq!(extend["boxShadow"].as_object().map(|m| m.len()), Some(5));
        assert!(extend["boxShadow"]["custom-1"].is_string());
    }

    #[test]
    fn tailwind_skips_empty_groups() {
        let js = tailwind_config(&token_set(Tokens::default())).expect("render");
        assert!(js.contains("\"extend\": {}"));
        assert!(!js.contains("colors"));
    }
}

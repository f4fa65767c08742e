//! Named design scales synthesized from ranked numeric samples.

use crate::config::Heuristics;
use crate::types::{RankedEntry, Scale};

use super::normalize::{parse_numeric_value, LengthUnit, NumericValue};

pub const FONT_SIZE_LABELS: [&str; 10] = [
    "xs", "sm", "base", "md", "lg", "xl", "2xl", "3xl", "4xl", "5xl",
];

pub const SPACING_LABELS: [&str; 16] = [
    "0", "px", "0.5", "1", "1.5", "2", "2.5", "3", "4", "5", "6", "8", "10", "12", "16", "20",
];

pub const RADIUS_LABELS: [&str; 8] = ["none", "sm", "md", "lg", "xl", "2xl", "3xl", "full"];

/// One distinct numeric value with the counts of every sample that had it.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedValue {
    pub number: f64,
    pub unit: LengthUnit,
    /// First spelling seen, used as the scale value.
    pub text: String,
    pub count: u64,
}

/// Parse, filter and merge ranked values by number and unit, ascending.
pub fn merge_numeric<F>(ranked: &[RankedEntry<String>], keep: F) -> Vec<MergedValue>
where
    F: Fn(&NumericValue) -> bool,
{
    let mut merged: Vec<MergedValue> = Vec::new();
    for entry in ranked {
        let Some(parsed) = parse_numeric_value(&entry.value) else {
            tracing::trace!(value = %entry.value, "not a numeric token; left out of scale");
            continue;
        };
        if !keep(&parsed) {
            continue;
        }
        match merged
            .iter_mut()
            .find(|m| m.number == parsed.number && m.unit == parsed.unit)
        {
            Some(existing) => existing.count += entry.count,
            None => merged.push(MergedValue {
                number: parsed.number,
                unit: parsed.unit,
                text: parsed.original,
                count: entry.count,
            }),
        }
    }
    // Raw number only: units are not converted, so order across units is
    // not meaningful (`0.5rem` sorts before `4px`).
    merged.sort_by(|a, b| a.number.total_cmp(&b.number));
    merged
}

/// Px font sizes centered on `base`: `n` distinct sizes start at label
/// `floor((10 - n) / 2)`.
pub fn build_font_size_scale(ranked: &[RankedEntry<String>], heuristics: &Heuristics) -> Scale {
    let mut values = merge_numeric(ranked, |n| n.unit == LengthUnit::Px);
    values.truncate(heuristics.font_scale_steps.min(FONT_SIZE_LABELS.len()));

    let start = (FONT_SIZE_LABELS.len() - values.len()) / 2;
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| (FONT_SIZE_LABELS[start + i].to_string(), v.text))
        .collect()
}

/// Positive px spacings. Values all on a grid base get ordinal labels,
/// anything else walks the fixed spacing label sequence.
pub fn build_spacing_scale(ranked: &[RankedEntry<String>], heuristics: &Heuristics) -> Scale {
    let mut values = merge_numeric(ranked, |n| n.unit == LengthUnit::Px && n.number > 0.0);
    values.truncate(heuristics.spacing_scale_steps.min(SPACING_LABELS.len()));
    if values.is_empty() {
        return Scale::new();
    }

    let on_grid = values.iter().all(|v| {
        heuristics
            .spacing_grid_bases
            .iter()
            .any(|base| *base > 0 && v.number % f64::from(*base) == 0.0)
    });

    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            let label = if on_grid {
                i.to_string()
            } else {
                SPACING_LABELS[i].to_string()
            };
            (label, v.text)
        })
        .collect()
}

/// Positive radii labelled from `sm` upward; pill/circle values (at or above
/// the full threshold, or percentages) take the `full` slot instead.
pub fn build_radius_scale(ranked: &[RankedEntry<String>], heuristics: &Heuristics) -> Scale {
    let mut values = merge_numeric(ranked, |n| n.number > 0.0);
    values.truncate(heuristics.radius_scale_steps.min(RADIUS_LABELS.len()));

    let full_index = RADIUS_LABELS.len() - 1;
    let is_full =
        |v: &MergedValue| v.number >= heuristics.radius_full_threshold || v.text.contains('%');

    let mut slots: Vec<Option<String>> = vec![None; RADIUS_LABELS.len()];
    for (i, v) in values.iter().enumerate() {
        if !is_full(v) && i + 1 < RADIUS_LABELS.len() {
            slots[i + 1] = Some(v.text.clone());
        }
    }
    for v in values.iter().filter(|v| is_full(v)) {
        slots[full_index] = Some(v.text.clone());
    }

    RADIUS_LABELS
        .iter()
        .zip(slots)
        .filter_map(|(label, slot)| slot.map(|value| (label.to_string(), value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(values: &[(&str, u64)]) -> Vec<RankedEntry<String>> {
        values
            .iter()
            .map(|(v, c)| RankedEntry {
                value: v.to_string(),
                count: *c,
            })
            .collect()
    }

    fn pairs(scale: &Scale) -> Vec<(&str, &str)> {
        scale.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn merge_accumulates_counts_per_number() {
        let merged = merge_numeric(&ranked(&[("16px", 5), ("12px", 2), ("16", 3)]), |_| true);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text, "12px");
        assert_eq!(merged[1].text, "16px");
        assert_eq!(merged[1].count, 8);
    }

    #[test]
    fn merge_keeps_units_apart() {
        let merged = merge_numeric(&ranked(&[("50%", 1), ("50px", 1)]), |_| true);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn font_scale_centers_small_sets() {
        let h = Heuristics::default();
        let scale = build_font_size_scale(&ranked(&[("16px", 50), ("24px", 20), ("12px", 10)]), &h);
        assert_eq!(pairs(&scale), vec![("md", "12px"), ("lg", "16px"), ("xl", "24px")]);
    }

    #[test]
    fn font_scale_ignores_non_px_and_caps_at_ten() {
        let h = Heuristics::default();
        let mut input: Vec<(String, u64)> = (1..=14).map(|i| (format!("{}px", 8 + i * 2), 1)).collect();
        input.push(("1.25rem".to_string(), 40));
        input.push(("normal".to_string(), 40));
        let ranked: Vec<RankedEntry<String>> = input
            .into_iter()
            .map(|(value, count)| RankedEntry { value, count })
            .collect();

        let scale = build_font_size_scale(&ranked, &h);
        assert_eq!(scale.len(), 10);
        assert_eq!(scale.get("xs").map(String::as_str), Some("10px"));
        assert_eq!(scale.get("5xl").map(String::as_str), Some("28px"));
    }

    #[test]
    fn font_scale_single_value_lands_on_md() {
        let scale = build_font_size_scale(&ranked(&[("14px", 3)]), &Heuristics::default());
        assert_eq!(pairs(&scale), vec![("md", "14px")]);
    }

    #[test]
    fn spacing_on_grid_uses_ordinal_labels() {
        let h = Heuristics::default();
        let scale = build_spacing_scale(
            &ranked(&[("16px", 9), ("8px", 7), ("0px", 30), ("auto", 4), ("24px", 2), ("4px", 1)]),
            &h,
        );
        assert_eq!(
            pairs(&scale),
            vec![("0", "4px"), ("1", "8px"), ("2", "16px"), ("3", "24px")]
        );
    }

    #[test]
    fn spacing_off_grid_uses_fixed_sequence() {
        let h = Heuristics::default();
        let scale = build_spacing_scale(&ranked(&[("10px", 3), ("6px", 2), ("16px", 1)]), &h);
        assert_eq!(
            pairs(&scale),
            vec![("0", "6px"), ("px", "10px"), ("0.5", "16px")]
        );
    }

    #[test]
    fn spacing_grid_bases_are_configurable() {
        let h = Heuristics {
            spacing_grid_bases: vec![5],
            ..Heuristics::default()
        };
        let scale = build_spacing_scale(&ranked(&[("10px", 3), ("15px", 2)]), &h);
        assert_eq!(pairs(&scale), vec![("0", "10px"), ("1", "15px")]);
    }

    #[test]
    fn spacing_caps_at_twelve() {
        let input: Vec<RankedEntry<String>> = (1..=20)
            .map(|i| RankedEntry {
                value: format!("{}px", i * 4),
                count: 1,
            })
            .collect();
        let scale = build_spacing_scale(&input, &Heuristics::default());
        assert_eq!(scale.len(), 12);
        assert_eq!(scale.get("11").map(String::as_str), Some("48px"));
    }

    #[test]
    fn radius_full_override_beats_rank() {
        let h = Heuristics::default();
        let scale = build_radius_scale(&ranked(&[("4px", 5), ("9999px", 1)]), &h);
        assert_eq!(pairs(&scale), vec![("sm", "4px"), ("full", "9999px")]);
    }

    #[test]
    fn radius_mixed_units_order_by_raw_number() {
        let scale = build_radius_scale(&ranked(&[("4px", 5), ("0.5rem", 2)]), &Heuristics::default());
        assert_eq!(pairs(&scale), vec![("sm", "0.5rem"), ("md", "4px")]);
    }

    #[test]
    fn radius_percent_goes_to_full() {
        let h = Heuristics::default();
        let scale = build_radius_scale(&ranked(&[("50%", 4), ("2px", 3), ("6px", 1), ("0px", 9)]), &h);
        assert_eq!(
            pairs(&scale),
            vec![("sm", "2px"), ("md", "6px"), ("full", "50%")]
        );
    }

    #[test]
    fn radius_eighth_value_is_overwritten_by_full() {
        let h = Heuristics::default();
        let scale = build_radius_scale(
            &ranked(&[
                ("1px", 1),
                ("2px", 1),
                ("3px", 1),
                ("4px", 1),
                ("5px", 1),
                ("6px", 1),
                ("7px", 1),
                ("8px", 1),
            ]),
            &h,
        );
        // seven values fit sm..full; the eighth has no label
        assert_eq!(scale.len(), 7);
        assert_eq!(scale.get("full").map(String::as_str), Some("7px"));

        let scale = build_radius_scale(&ranked(&[("1px", 1), ("2px", 1), ("3px", 1), ("4px", 1), ("5px", 1), ("6px", 1), ("999px", 1)]), &h);
        assert_eq!(scale.get("3xl").map(String::as_str), Some("6px"));
        assert_eq!(scale.get("full").map(String::as_str), Some("999px"));
    }

    #[test]
    fn builders_return_empty_scales_without_input() {
        let h = Heuristics::default();
        let junk = ranked(&[("auto", 3), ("0px", 2), ("calc(1px + 2px)", 1)]);
        assert!(build_font_size_scale(&[], &h).is_empty());
        assert!(build_spacing_scale(&junk, &h).is_empty());
        assert!(build_radius_scale(&junk, &h).is_empty());
    }
}

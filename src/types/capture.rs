//! Capture documents produced by the page sampler.
//!
//! A capture holds everything the sampler observed on one page: root custom
//! properties, keyframe rules, per-element style samples and the motion
//! events fired while the page was probed. Style values are kept as raw
//! strings; classification happens in [`crate::tokens`].

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{DteError, Result};

/// Top-level keys a capture must carry.
pub const REQUIRED_FIELDS: [&str; 3] = ["rootVars", "keyframes", "samples"];

/// A raw computed-style value.
///
/// Deserialization is lenient: `null` and missing values become the empty
/// string and numbers/booleans are stringified, so one odd value never
/// rejects a whole capture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CssValue(String);

impl CssValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for CssValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CssValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for CssValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => CssValue(s),
            Value::Number(n) => CssValue(n.to_string()),
            Value::Bool(b) => CssValue(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => CssValue::default(),
        })
    }
}

/// `null` decodes like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The sampler's extraction for one page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExtraction {
    pub root_vars: IndexMap<String, CssValue>,
    pub keyframes: Vec<KeyframeDefinition>,
    pub samples: SampleSet,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleSet {
    #[serde(deserialize_with = "null_as_default")]
    pub colors: Vec<ColorSample>,
    #[serde(deserialize_with = "null_as_default")]
    pub typography: Vec<TypographyTuple>,
    #[serde(deserialize_with = "null_as_default")]
    pub motion: Vec<MotionSample>,
    #[serde(deserialize_with = "null_as_default")]
    pub spacing: Vec<SpacingSample>,
    #[serde(deserialize_with = "null_as_default")]
    pub sizing: Vec<SizingSample>,
}

/// Color-bearing properties of one element (`color`, `backgroundColor`,
/// border sides, `outlineColor`, `fill`, `stroke`, ...) plus its shadows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSample {
    #[serde(deserialize_with = "null_as_default")]
    pub colors: IndexMap<String, CssValue>,
    #[serde(deserialize_with = "null_as_default")]
    pub shadows: ShadowPair,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShadowPair {
    pub box_shadow: CssValue,
    pub text_shadow: CssValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypographyTuple {
    pub font_family: CssValue,
    pub font_size: CssValue,
    pub font_weight: CssValue,
    pub font_style: CssValue,
    pub line_height: CssValue,
    pub letter_spacing: CssValue,
    pub text_transform: CssValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransitionTuple {
    pub transition_property: CssValue,
    pub transition_duration: CssValue,
    pub transition_timing_function: CssValue,
    pub transition_delay: CssValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationTuple {
    pub animation_name: CssValue,
    pub animation_duration: CssValue,
    pub animation_timing_function: CssValue,
    pub animation_delay: CssValue,
    pub animation_iteration_count: CssValue,
    pub animation_direction: CssValue,
    pub animation_fill_mode: CssValue,
    pub animation_play_state: CssValue,
}

/// Declared transition and animation properties of one element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MotionSample {
    #[serde(flatten)]
    pub transition: TransitionTuple,
    #[serde(flatten)]
    pub animation: AnimationTuple,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpacingSample {
    pub margin_top: CssValue,
    pub margin_right: CssValue,
    pub margin_bottom: CssValue,
    pub margin_left: CssValue,
    pub padding_top: CssValue,
    pub padding_right: CssValue,
    pub padding_bottom: CssValue,
    pub padding_left: CssValue,
    pub gap: CssValue,
    pub row_gap: CssValue,
    pub column_gap: CssValue,
}

impl SpacingSample {
    pub fn values(&self) -> [&CssValue; 11] {
        [
            &self.margin_top,
            &self.margin_right,
            &self.margin_bottom,
            &self.margin_left,
            &self.padding_top,
            &self.padding_right,
            &self.padding_bottom,
            &self.padding_left,
            &self.gap,
            &self.row_gap,
            &self.column_gap,
        ]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SizingSample {
    pub border_top_left_radius: CssValue,
    pub border_top_right_radius: CssValue,
    pub border_bottom_right_radius: CssValue,
    pub border_bottom_left_radius: CssValue,
}

impl SizingSample {
    pub fn radii(&self) -> [&CssValue; 4] {
        [
            &self.border_top_left_radius,
            &self.border_top_right_radius,
            &self.border_bottom_right_radius,
            &self.border_bottom_left_radius,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyframeDefinition {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub frames: Vec<Keyframe>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Keyframe {
    #[serde(deserialize_with = "null_as_default")]
    pub key_text: String,
    pub style: CssValue,
}

/// A transition or animation observed firing while the page was probed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MotionEvent {
    #[serde(rename_all = "camelCase")]
    Transition {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        property_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        elapsed_time: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        computed: Option<TransitionTuple>,
    },
    #[serde(rename_all = "camelCase")]
    Animation {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        animation_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        elapsed_time: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        computed: Option<AnimationTuple>,
    },
    #[serde(other)]
    Unknown,
}

impl MotionEvent {
    pub fn transition(computed: TransitionTuple) -> Self {
        MotionEvent::Transition {
            property_name: None,
            elapsed_time: None,
            timestamp: None,
            computed: Some(computed),
        }
    }

    pub fn animation(computed: AnimationTuple) -> Self {
        MotionEvent::Animation {
            animation_name: None,
            elapsed_time: None,
            timestamp: None,
            computed: Some(computed),
        }
    }
}

/// Motion events accumulated across all interaction steps, in firing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MotionEventLog {
    events: Vec<MotionEvent>,
}

impl MotionEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: MotionEvent) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &MotionEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Parse a JSON array of events, skipping entries that are not events.
    pub fn from_values(values: Vec<Value>) -> Self {
        let events = values
            .into_iter()
            .filter_map(|v| match serde_json::from_value::<MotionEvent>(v) {
                Ok(event) => Some(event),
                Err(err) => {
                    tracing::trace!(%err, "skipping malformed motion event");
                    None
                }
            })
            .collect();
        Self { events }
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(contents)? {
            Value::Array(items) => Ok(Self::from_values(items)),
            _ => Err(DteError::invalid_input(
                "motion events must be a JSON array",
            )),
        }
    }
}

impl From<Vec<MotionEvent>> for MotionEventLog {
    fn from(events: Vec<MotionEvent>) -> Self {
        Self { events }
    }
}

/// Sampling parameters, echoed into the output metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionParams {
    pub max_elements: u32,
    pub interactions_enabled: bool,
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            max_elements: 2000,
            interactions_enabled: true,
        }
    }
}

/// A capture file: the extraction plus optional source URL and inline events.
#[derive(Debug, Clone, Default)]
pub struct CaptureDocument {
    pub url: Option<String>,
    pub extraction: RawExtraction,
    pub motion_events: MotionEventLog,
}

impl CaptureDocument {
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(contents)?;
        Self::from_value(value)
    }

    /// Check the structural contract, then decode.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(DteError::invalid_input(
                "capture document must be a JSON object",
            ));
        };

        for field in REQUIRED_FIELDS {
            if map.get(field).map_or(true, Value::is_null) {
                return Err(DteError::missing_field(field));
            }
        }

        let url = match map.remove("url") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        };
        let motion_events = match map.remove("motionEvents") {
            Some(Value::Array(items)) => MotionEventLog::from_values(items),
            _ => MotionEventLog::new(),
        };
        let extraction: RawExtraction = serde_json::from_value(Value::Object(map))
            .map_err(|e| DteError::invalid_input(format!("malformed capture: {e}")))?;

        Ok(Self {
            url,
            extraction,
            motion_events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> Value {
        json!({ "rootVars": {}, "keyframes": [], "samples": {} })
    }

    #[test]
    fn minimal_capture_decodes_with_empty_samples() {
        let doc = CaptureDocument::from_value(minimal()).expect("decode");
        assert!(doc.url.is_none());
        assert!(doc.extraction.samples.colors.is_empty());
        assert!(doc.extraction.samples.sizing.is_empty());
        assert!(doc.motion_events.is_empty());
    }

    #[test]
    fn missing_required_field_is_invalid_input() {
        for field in REQUIRED_FIELDS {
            let mut value = minimal();
            value.as_object_mut().unwrap().remove(field);
            let err = CaptureDocument::from_value(value).unwrap_err();
            match err {
                DteError::InvalidInput(msg) => assert!(msg.contains(field), "got: {msg}"),
                other => panic!("expected InvalidInput, got {other:?}"),
            }
        }
    }

    #[test]
    fn null_required_field_is_invalid_input() {
        let value = json!({ "rootVars": {}, "keyframes": null, "samples": {} });
        assert!(matches!(
            CaptureDocument::from_value(value),
            Err(DteError::InvalidInput(_))
        ));
    }

    #[test]
    fn non_object_document_is_rejected() {
        assert!(matches!(
            CaptureDocument::from_value(json!([1, 2])),
            Err(DteError::InvalidInput(_))
        ));
    }

    #[test]
    fn wrong_section_type_is_invalid_input() {
        let value = json!({ "rootVars": {}, "keyframes": [], "samples": [] });
        assert!(matches!(
            CaptureDocument::from_value(value),
            Err(DteError::InvalidInput(_))
        ));
    }

    #[test]
    fn style_values_are_lenient() {
        let value = json!({
            "rootVars": { "--a": "#fff", "--n": 4, "--z": null },
            "keyframes": [],
            "samples": {
                "typography": [ { "fontSize": "16px", "fontWeight": 400, "lineHeight": null } ]
            }
        });
        let doc = CaptureDocument::from_value(value).expect("decode");
        let t = &doc.extraction.samples.typography[0];
        assert_eq!(t.font_size.as_str(), "16px");
        assert_eq!(t.font_weight.as_str(), "400");
        assert!(t.line_height.is_empty());
        assert!(t.font_family.is_empty());
        assert_eq!(doc.extraction.root_vars["--n"].as_str(), "4");
        assert!(doc.extraction.root_vars["--z"].is_empty());
    }

    #[test]
    fn null_sections_decode_as_empty() {
        let value = json!({
            "rootVars": {},
            "keyframes": [
                { "name": null, "frames": null },
                { "name": "fade", "frames": [ { "keyText": null, "style": "opacity: 0" } ] }
            ],
            "samples": {
                "colors": [
                    { "colors": { "color": "#111111" }, "shadows": null },
                    { "colors": null, "shadows": { "boxShadow": "0px 1px 2px #000" } }
                ],
                "typography": null,
                "sizing": null
            }
        });
        let doc = CaptureDocument::from_value(value).expect("decode");
        let samples = &doc.extraction.samples;
        assert_eq!(samples.colors.len(), 2);
        assert_eq!(samples.colors[0].colors["color"].as_str(), "#111111");
        assert!(samples.colors[0].shadows.box_shadow.is_empty());
        assert!(samples.colors[1].colors.is_empty());
        assert_eq!(samples.colors[1].shadows.box_shadow.as_str(), "0px 1px 2px #000");
        assert!(samples.typography.is_empty());
        assert!(samples.sizing.is_empty());

        let keyframes = &doc.extraction.keyframes;
        assert!(keyframes[0].name.is_empty());
        assert!(keyframes[0].frames.is_empty());
        assert!(keyframes[1].frames[0].key_text.is_empty());

        let doc = CaptureDocument::from_value(json!({
            "rootVars": {}, "keyframes": [], "samples": { "colors": null }
        }))
        .expect("decode");
        assert!(doc.extraction.samples.colors.is_empty());
    }

    #[test]
    fn root_vars_keep_document_order() {
        let doc = CaptureDocument::from_json_str(
            r#"{"rootVars":{"--z":"1","--a":"2","--m":"3"},"keyframes":[],"samples":{}}"#,
        )
        .expect("decode");
        let keys: Vec<&str> = doc.extraction.root_vars.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["--z", "--a", "--m"]);
    }

    #[test]
    fn motion_sample_flattens_both_tuples() {
        let value = json!({
            "transitionProperty": "opacity",
            "transitionDuration": "0.2s",
            "animationName": "spin",
            "animationDuration": "1s"
        });
        let sample: MotionSample = serde_json::from_value(value).expect("decode");
        assert_eq!(sample.transition.transition_property.as_str(), "opacity");
        assert_eq!(sample.animation.animation_name.as_str(), "spin");
        assert!(sample.animation.animation_delay.is_empty());
    }

    #[test]
    fn inline_motion_events_skip_unknown_and_malformed_entries() {
        let value = json!({
            "rootVars": {}, "keyframes": [], "samples": {},
            "url": " https://example.com/ ",
            "motionEvents": [
                { "kind": "transition", "propertyName": "opacity",
                  "computed": { "transitionProperty": "opacity", "transitionDuration": "0.3s" } },
                { "kind": "animation", "animationName": "fade", "elapsedTime": 0, "timestamp": 1700000000000u64,
                  "computed": { "animationName": "fade" } },
                { "kind": "scroll" },
                "not-an-event"
            ]
        });
        let doc = CaptureDocument::from_value(value).expect("decode");
        assert_eq!(doc.url.as_deref(), Some("https://example.com/"));
        assert_eq!(doc.motion_events.len(), 3);
        let kinds: Vec<bool> = doc
            .motion_events
            .iter()
            .map(|e| matches!(e, MotionEvent::Unknown))
            .collect();
        assert_eq!(kinds, vec![false, false, true]);
    }

    #[test]
    fn motion_events_file_must_be_array() {
        assert!(MotionEventLog::from_json_str("[]").expect("array").is_empty());
        assert!(matches!(
            MotionEventLog::from_json_str("{}"),
            Err(DteError::InvalidInput(_))
        ));
    }
}

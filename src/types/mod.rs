//! Data types shared by the engine, the exporters and the CLI.
//!
//! - [`capture`] - what the page sampler hands us
//! - [`token_set`] - what the engine produces

pub mod capture;
pub mod token_set;

pub use capture::{
    AnimationTuple, CaptureDocument, ColorSample, CssValue, ExtractionParams, Keyframe,
    KeyframeDefinition, MotionEvent, MotionEventLog, MotionSample, RawExtraction, SampleSet,
    ShadowPair, SizingSample, SpacingSample, TransitionTuple, TypographyTuple, REQUIRED_FIELDS,
};
pub use token_set::{
    ColorTokens, DebugInfo, MotionTokens, RankedEntry, Scale, ScaleTokens, SemanticColors,
    TokenMeta, TokenSet, TokenSummary, Tokens, TypographyTokens,
};

//! Design Token Extractor (DTE) Library
//!
//! Reduces the raw computed-style samples captured from a rendered page into a
//! compact design token set: ranked colors, gradients and shadows, semantic
//! color roles, typography/spacing/radius scales and motion tokens.
//!
//! # Module Overview
//!
//! - [`types`] - Capture documents and the token set data model
//! - [`tokens`] - The aggregation engine (classification, ranking, scales)
//! - [`exporters`] - CSS custom property and Tailwind config renderers
//! - [`source`] - Input sources, source URL validation, artifact naming
//! - [`config`] - Configuration file support
//! - [`output`] - JSON output schemas
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use dte_lib::{aggregate, css_custom_properties, AggregationContext, CaptureDocument, Config};
//!
//! # fn example() -> dte_lib::Result<()> {
//! let capture = CaptureDocument::from_json_str(&std::fs::read_to_string("capture.json")?)?;
//! let context = AggregationContext::new("https://example.com/", Utc::now());
//! let tokens = aggregate(&capture.extraction, &capture.motion_events, &context, &Config::default());
//! println!("{}", css_custom_properties(&tokens));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod exporters;
pub mod output;
pub mod source;
pub mod tokens;
pub mod types;

pub use config::{Config, Heuristics, RankingCaps};
pub use error::{DteError, ErrorCategory, ErrorPayload, Result};
pub use exporters::{css_custom_properties, tailwind_config};
pub use output::{
    ArtifactFormat, BatchItem, BatchOutput, DteOutput, ErrorOutput, ExtractOutput, GeneratedFile,
    DTE_OUTPUT_VERSION,
};
pub use source::{
    artifact_stem, resolve_artifact_path, sanitize_filename_part, validate_source_url,
    write_atomic, ArtifactKind, InputSource,
};
pub use tokens::{aggregate, AggregationContext, ColorCategory, SemanticRole};
pub use types::{
    CaptureDocument, ExtractionParams, MotionEvent, MotionEventLog, RawExtraction, TokenSet,
    TokenSummary,
};

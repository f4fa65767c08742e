use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::ParseError;

#[derive(Debug, Error)]
pub enum DteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ParseError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl DteError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        DteError::InvalidInput(message.into())
    }

    pub fn missing_field(field: &str) -> Self {
        DteError::InvalidInput(format!("missing required field `{field}`"))
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            DteError::Io(e) => ErrorPayload::new(
                ErrorCategory::Io,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            DteError::InvalidInput(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("missing required field") {
                    ErrorPayload::new(
                        ErrorCategory::Input,
                        msg.to_string(),
                        "The capture must contain rootVars, keyframes and samples; re-run the page sampler.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Input,
                        msg.to_string(),
                        "Verify the capture file is the sampler's JSON output.",
                    )
                }
            }
            DteError::InvalidUrl(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Use a full URL like https://www.example.com/.",
            ),
            DteError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Input,
                e.to_string(),
                "Check the JSON syntax of the capture/motion-event files; run with --verbose for details.",
            ),
            DteError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("http") && lower.contains("url") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Only http:// and https:// sources are accepted (e.g., https://example.com).",
                    )
                } else if lower.contains("config") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Fix or remove the TOML config (--config or ~/.config/dte/config.toml).",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths (e.g., --input, --out) and retry.",
                    )
                }
            }
            DteError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, DteError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Input,
    Config,
    Io,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_payload_names_required_sections() {
        let err = DteError::missing_field("samples");
        let payload = err.to_payload();
        assert_eq!(payload.category, ErrorCategory::Input);
        assert!(payload.message.contains("`samples`"));
        let remediation = payload.remediation.unwrap_or_default();
        assert!(
            remediation.contains("rootVars") && remediation.contains("keyframes"),
            "expected remediation to list required sections, got: {remediation}"
        );
    }

    #[test]
    fn config_payload_includes_url_hint() {
        let err = DteError::Config("Source URL must use http or https: ftp://x".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.contains("https://"),
            "expected URL remediation, got: {remediation}"
        );
    }

    #[test]
    fn config_payload_includes_config_file_hint() {
        let err = DteError::Config("Failed to read config dte.toml: bad key".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.contains("TOML"),
            "expected config remediation, got: {remediation}"
        );
    }

    #[test]
    fn config_payload_uses_default_remediation_for_other_messages() {
        let err = DteError::Config("Some other config issue".to_string());
        let remediation = err.to_payload().remediation.unwrap_or_default();
        assert!(
            remediation.contains("Check flags/paths"),
            "expected default remediation for generic config errors"
        );
    }

    #[test]
    fn serialization_errors_are_input_category() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let payload = DteError::from(json_err).to_payload();
        assert_eq!(payload.category, ErrorCategory::Input);
    }
}

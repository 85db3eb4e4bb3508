//! Descriptor import and export
//!
//! Descriptors serialize to JSON or to a human-editable YAML block format.
//! Export format is always chosen by the caller. Import sniffs the content:
//! text starting with `{` is JSON, anything else is YAML.

use crate::descriptor::Descriptor;
use crate::error::{DataEditError, Result};
use serde_json::Value;

/// Serialization format for descriptor export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// YAML block format
    Yaml,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl Descriptor {
    /// Parse a descriptor from JSON or YAML text.
    ///
    /// Content starting with `{` (after trimming) is treated as JSON;
    /// anything else is parsed as YAML. A document that decodes to
    /// something other than a mapping is rejected.
    pub fn from_text(text: &str) -> Result<Self> {
        let text = text.trim();
        let value: Value = if text.starts_with('{') {
            serde_json::from_str(text)
                .map_err(|e| DataEditError::ImportDecode(e.to_string()))?
        } else {
            serde_yaml::from_str(text)
                .map_err(|e| DataEditError::ImportDecode(e.to_string()))?
        };

        Descriptor::from_value(value)
            .ok_or_else(|| DataEditError::ImportDecode("descriptor is not a mapping".to_string()))
    }

    /// Render the descriptor in the requested export format
    pub fn to_text(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| DataEditError::Serialization(e.to_string())),
            ExportFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| DataEditError::Serialization(e.to_string()))
            }
        }
    }
}

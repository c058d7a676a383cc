//! Result type shared by every conversion direction.

use mycomd_core::Warnings;
use serde::Serialize;

/// Warning returned when source and destination grammar are the same.
pub const NO_CONVERSION_NEEDED: &str = "No conversion needed - already in target format";

/// Converted text together with the lossy-conversion warnings collected on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Conversion {
    /// Text in the destination grammar.
    pub text: String,
    /// Human-readable warnings, in the order they were raised.
    pub warnings: Vec<String>,
}

impl Conversion {
    /// Build a conversion result from text and a warning collector.
    pub fn new(text: String, warnings: Warnings) -> Self {
        Self {
            text,
            warnings: warnings.into_vec(),
        }
    }

    /// Content returned as-is because no conversion was needed.
    pub fn unchanged(content: &str) -> Self {
        Self {
            text: content.to_string(),
            warnings: vec![NO_CONVERSION_NEEDED.to_string()],
        }
    }
}

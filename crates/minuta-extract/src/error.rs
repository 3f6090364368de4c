//! Error types for the extraction engine.

use minuta_core::error::MinutaError;

/// Errors from action-item extraction.
///
/// Extraction itself is total; the only failure is a target-name pattern
/// that cannot be compiled into the cue table.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Invalid target name pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl ExtractError {
    pub(crate) fn empty_pattern() -> Self {
        ExtractError::InvalidPattern {
            pattern: String::new(),
            reason: "pattern is empty".to_string(),
        }
    }
}

impl From<ExtractError> for MinutaError {
    fn from(err: ExtractError) -> Self {
        MinutaError::Extraction(err.to_string())
    }
}

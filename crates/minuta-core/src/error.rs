use thiserror::Error;

/// Top-level error type for Minuta.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for MinutaError` so that `?` works across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MinutaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Document source error: {0}")]
    Source(String),

    #[error("Card sink error: {0}")]
    Sink(String),

    #[error("Processed-set tracker error: {0}")]
    Tracker(String),

    #[error("Extraction error: {0}")]
    Extraction(String),
}

impl From<toml::de::Error> for MinutaError {
    fn from(err: toml::de::Error) -> Self {
        MinutaError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for MinutaError {
    fn from(err: toml::ser::Error) -> Self {
        MinutaError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for MinutaError {
    fn from(err: serde_json::Error) -> Self {
        MinutaError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Minuta operations.
pub type Result<T> = std::result::Result<T, MinutaError>;

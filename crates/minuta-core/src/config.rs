use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::types::UNTITLED_MEETING;

/// Top-level configuration for Minuta.
///
/// Loaded from `~/.minuta/config.toml` by default. Each section corresponds
/// to one stage of a processing run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MinutaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub sink: SinkConfig,
}

impl MinutaConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MinutaConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding the processed-set file.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.minuta".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Action-item extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Regex fragment matching the person whose action items are extracted.
    /// Alternation is allowed (`Filipe|Felipe`). Not escaped.
    pub target_name_pattern: String,
    /// Tasks of this many characters or fewer are discarded.
    pub min_task_chars: usize,
    /// Characters after a cue match start searched for a due date.
    pub date_window_chars: usize,
    /// Title used when none can be derived from the document name.
    pub untitled_title: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            target_name_pattern: String::new(),
            min_task_chars: 5,
            date_window_chars: 100,
            untitled_title: UNTITLED_MEETING.to_string(),
        }
    }
}

/// Meeting-notes document source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory scanned for notes files.
    pub notes_dir: String,
    /// Only documents whose name contains this string are processed.
    /// Empty disables the filter.
    pub name_contains: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            notes_dir: ".".to_string(),
            name_contains: "Anotações do Gemini".to_string(),
        }
    }
}

/// Processed-document tracker settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// File name of the processed set, relative to `general.data_dir`.
    pub file_name: String,
    /// Maximum number of document IDs retained.
    pub retention: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            file_name: "processed.json".to_string(),
            retention: 500,
        }
    }
}

/// Card sink settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// JSON-lines output file. Empty writes cards to stdout.
    pub output: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MinutaError;

    #[test]
    fn test_default_config_values() {
        let config = MinutaConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.extraction.min_task_chars, 5);
        assert_eq!(config.extraction.date_window_chars, 100);
        assert_eq!(config.extraction.untitled_title, "Untitled Meeting");
        assert!(config.extraction.target_name_pattern.is_empty());
        assert_eq!(config.source.name_contains, "Anotações do Gemini");
        assert_eq!(config.tracker.retention, 500);
        assert!(config.sink.output.is_empty());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = r#"
[extraction]
target_name_pattern = "Filipe|Felipe"

[tracker]
retention = 50
"#;
        let config: MinutaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.extraction.target_name_pattern, "Filipe|Felipe");
        assert_eq!(config.extraction.date_window_chars, 100);
        assert_eq!(config.tracker.retention, 50);
        assert_eq!(config.tracker.file_name, "processed.json");
        assert_eq!(config.general.data_dir, "~/.minuta");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: MinutaConfig = toml::from_str("").unwrap();
        assert_eq!(config.extraction.min_task_chars, 5);
        assert_eq!(config.source.notes_dir, ".");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = MinutaConfig::default();
        config.extraction.target_name_pattern = "Ana".to_string();
        config.sink.output = "/tmp/cards.jsonl".to_string();
        config.save(&path).unwrap();

        let loaded = MinutaConfig::load(&path).unwrap();
        assert_eq!(loaded.extraction.target_name_pattern, "Ana");
        assert_eq!(loaded.sink.output, "/tmp/cards.jsonl");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = MinutaConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, MinutaError::Io(_)));
    }

    #[test]
    fn test_load_or_default_on_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let config = MinutaConfig::load_or_default(&path);
        assert_eq!(config.tracker.retention, 500);
    }
}

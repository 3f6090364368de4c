//! Processed-document tracker.
//!
//! An append-only, bounded set of document IDs that have already been turned
//! into cards. Persisted as a JSON array, oldest first.

use std::collections::VecDeque;
use std::path::Path;

use tracing::{debug, info};

use minuta_core::error::{MinutaError, Result};

/// Ordered set of processed document IDs with bounded retention.
#[derive(Debug, Clone)]
pub struct ProcessedSet {
    ids: VecDeque<String>,
    retention: usize,
}

impl ProcessedSet {
    pub fn new(retention: usize) -> Self {
        Self {
            ids: VecDeque::new(),
            retention,
        }
    }

    /// Load the set from `path`. A missing file yields an empty set; extra
    /// entries beyond `retention` are dropped from the oldest end.
    pub fn load(path: &Path, retention: usize) -> Result<Self> {
        let mut set = Self::new(retention);
        if !path.exists() {
            debug!(path = %path.display(), "No processed set yet");
            return Ok(set);
        }

        let content = std::fs::read_to_string(path)?;
        let ids: Vec<String> = serde_json::from_str(&content).map_err(|e| {
            MinutaError::Tracker(format!("{}: {}", path.display(), e))
        })?;
        for id in ids {
            set.insert(id);
        }
        info!(path = %path.display(), count = set.len(), "Processed set loaded");
        Ok(set)
    }

    /// Write the set to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let ids: Vec<&String> = self.ids.iter().collect();
        let content = serde_json::to_string_pretty(&ids)?;
        std::fs::write(path, content)?;
        debug!(path = %path.display(), count = self.len(), "Processed set saved");
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    /// Record `id`. Returns false if it was already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.ids.push_back(id);
        while self.ids.len() > self.retention {
            self.ids.pop_front();
        }
        true
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let mut set = ProcessedSet::new(10);
        assert!(set.insert("doc-1"));
        assert!(!set.insert("doc-1"));
        assert!(set.contains("doc-1"));
        assert!(!set.contains("doc-2"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_retention_evicts_oldest() {
        let mut set = ProcessedSet::new(3);
        for id in ["a", "b", "c", "d", "e"] {
            set.insert(id);
        }
        assert_eq!(set.len(), 3);
        assert!(!set.contains("a"));
        assert!(!set.contains("b"));
        assert!(set.contains("c"));
        assert!(set.contains("e"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let set = ProcessedSet::load(&dir.path().join("processed.json"), 500).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("processed.json");

        let mut set = ProcessedSet::new(500);
        set.insert("doc-1");
        set.insert("doc-2");
        set.save(&path).unwrap();

        let loaded = ProcessedSet::load(&path, 500).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.contains("doc-1"));
        assert!(loaded.contains("doc-2"));
    }

    #[test]
    fn test_load_applies_smaller_retention() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed.json");
        std::fs::write(&path, r#"["a", "b", "c", "d"]"#).unwrap();

        let loaded = ProcessedSet::load(&path, 2).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.contains("c"));
        assert!(loaded.contains("d"));
    }

    #[test]
    fn test_load_corrupt_file_is_tracker_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = ProcessedSet::load(&path, 10).unwrap_err();
        assert!(matches!(err, MinutaError::Tracker(_)));
    }
}

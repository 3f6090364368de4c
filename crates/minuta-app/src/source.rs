//! Document sources.
//!
//! `DirectorySource` lists the meeting-notes files of a single directory.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use minuta_core::error::{MinutaError, Result};
use minuta_core::types::SourceDocument;

/// File extensions read as meeting notes.
const NOTE_EXTENSIONS: &[&str] = &["txt", "md"];

/// Supplies the documents a processing run looks at.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn list_documents(&self) -> Result<Vec<SourceDocument>>;
}

/// Reads `*.txt` and `*.md` files from one directory (non-recursive).
pub struct DirectorySource {
    dir: PathBuf,
    name_contains: Option<String>,
}

impl DirectorySource {
    /// `name_contains` keeps only files whose stem contains the given text.
    pub fn new(dir: impl Into<PathBuf>, name_contains: Option<String>) -> Self {
        Self {
            dir: dir.into(),
            name_contains,
        }
    }

    fn matches_name(&self, path: &Path) -> bool {
        let Some(ref needle) = self.name_contains else {
            return true;
        };
        path.file_stem()
            .map(|stem| stem.to_string_lossy().contains(needle.as_str()))
            .unwrap_or(false)
    }

    fn is_note(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| NOTE_EXTENSIONS.iter().any(|n| e.eq_ignore_ascii_case(n)))
            .unwrap_or(false)
    }

    async fn read_document(&self, path: &Path) -> Result<SourceDocument> {
        let id = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                MinutaError::Source(format!("Non UTF-8 file name: {}", path.display()))
            })?
            .to_string();
        let name = path
            .file_stem()
            .and_then(|n| n.to_str())
            .unwrap_or(id.as_str())
            .to_string();

        let body = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MinutaError::Source(format!("{}: {}", path.display(), e)))?;
        let metadata = tokio::fs::metadata(path).await?;
        let created: SystemTime = metadata
            .created()
            .or_else(|_| metadata.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        let absolute = tokio::fs::canonicalize(path).await?;

        Ok(SourceDocument {
            id,
            name,
            body,
            created_at: DateTime::<Utc>::from(created),
            url: format!("file://{}", absolute.display()),
        })
    }
}

#[async_trait]
impl DocumentSource for DirectorySource {
    /// Only a failure to open the directory is an error. Files that cannot
    /// be read are skipped with a warning.
    async fn list_documents(&self) -> Result<Vec<SourceDocument>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| MinutaError::Source(format!("{}: {}", self.dir.display(), e)))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file() || !Self::is_note(&path) {
                continue;
            }
            if !self.matches_name(&path) {
                debug!(path = %path.display(), "Skipping file without name marker");
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            match self.read_document(&path).await {
                Ok(document) => documents.push(document),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable file"),
            }
        }

        info!(dir = %self.dir.display(), count = documents.len(), "Documents listed");
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[tokio::test]
    async fn test_lists_notes_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.md", "second");
        write(dir.path(), "a.txt", "first");
        write(dir.path(), "image.png", "ignored");
        std::fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let docs = DirectorySource::new(dir.path(), None)
            .list_documents()
            .await
            .unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["a.txt", "b.md"]);
        assert_eq!(docs[0].name, "a");
        assert_eq!(docs[0].body, "first");
        assert!(docs[0].url.starts_with("file://"));
        assert!(docs[0].url.ends_with("a.txt"));
    }

    #[tokio::test]
    async fn test_name_filter() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Weekly Sync - Anotações do Gemini.txt", "notes");
        write(dir.path(), "shopping list.txt", "milk");

        let docs = DirectorySource::new(dir.path(), Some("Anotações do Gemini".to_string()))
            .list_documents()
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name, "Weekly Sync - Anotações do Gemini");
    }

    #[tokio::test]
    async fn test_unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a - Anotações do Gemini.txt", "@Filipe: book the room");
        std::fs::write(
            dir.path().join("b - Anotações do Gemini.txt"),
            [0xff, 0xfe, 0x41],
        )
        .unwrap();

        let docs = DirectorySource::new(dir.path(), Some("Anotações do Gemini".to_string()))
            .list_documents()
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "a - Anotações do Gemini.txt");
    }

    #[tokio::test]
    async fn test_filtered_files_are_never_read() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Sync - Anotações do Gemini.md", "notes");
        std::fs::write(dir.path().join("binary dump.txt"), [0xff, 0xfe]).unwrap();

        let docs = DirectorySource::new(dir.path(), Some("Anotações do Gemini".to_string()))
            .list_documents()
            .await
            .unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["Sync - Anotações do Gemini.md"]);
    }

    #[tokio::test]
    async fn test_missing_directory_is_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DirectorySource::new(dir.path().join("missing"), None)
            .list_documents()
            .await
            .unwrap_err();
        assert!(matches!(err, MinutaError::Source(_)));
    }
}

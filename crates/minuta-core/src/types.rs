use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Title used when a document name yields nothing usable.
pub const UNTITLED_MEETING: &str = "Untitled Meeting";

// =============================================================================
// Source documents
// =============================================================================

/// A meeting-notes document as supplied by a document source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Stable identifier, used by the processed-set tracker.
    pub id: String,
    /// Display name (e.g. "Weekly Sync - Anotações do Gemini").
    pub name: String,
    /// Plain-text body.
    pub body: String,
    pub created_at: DateTime<Utc>,
    /// Dereferenceable link back to the document.
    pub url: String,
}

// =============================================================================
// Extraction results
// =============================================================================

/// Meeting metadata derived once per document.
///
/// Shared read-only by every action item extracted from that document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingInfo {
    pub title: String,
    pub date: NaiveDate,
    pub document_url: String,
}

/// A commitment extracted from meeting notes and attributed to one person.
///
/// Invariant: `task` is longer than the configured minimum after cleaning, and
/// the meeting fields are copies of a single `MeetingInfo`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub task: String,
    pub due_date: Option<NaiveDate>,
    pub meeting_title: String,
    pub meeting_date: NaiveDate,
    pub document_url: String,
    /// The matched source text, kept for diagnostics.
    pub raw_text: String,
}

impl ActionItem {
    pub fn new(
        task: String,
        due_date: Option<NaiveDate>,
        meeting: &MeetingInfo,
        raw_text: String,
    ) -> Self {
        Self {
            task,
            due_date,
            meeting_title: meeting.title.clone(),
            meeting_date: meeting.date,
            document_url: meeting.document_url.clone(),
            raw_text,
        }
    }
}

//! Extraction pipeline.
//!
//! Composes meeting-info derivation, action-item extraction and
//! deduplication over one document. Holds no state beyond its
//! configuration and performs no I/O.

use chrono::NaiveDate;
use tracing::info;

use minuta_core::config::ExtractionConfig;
use minuta_core::types::{ActionItem, SourceDocument};

use crate::dedup::dedupe;
use crate::error::ExtractError;
use crate::extractor::ActionItemExtractor;
use crate::meeting::MeetingInfoExtractor;

pub struct ExtractionPipeline {
    config: ExtractionConfig,
    meeting: MeetingInfoExtractor,
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl ExtractionPipeline {
    pub fn new(config: ExtractionConfig) -> Self {
        let meeting = MeetingInfoExtractor::new(&config.untitled_title);
        Self { config, meeting }
    }

    /// Extract the deduplicated action items of `document` for the person
    /// matched by `target_name_pattern`.
    ///
    /// `reference` is the "today" all relative due dates resolve against.
    pub fn run(
        &self,
        document: &SourceDocument,
        target_name_pattern: &str,
        reference: NaiveDate,
    ) -> Result<Vec<ActionItem>, ExtractError> {
        self.run_parts(
            &document.name,
            &document.body,
            document.created_at,
            &document.url,
            target_name_pattern,
            reference,
        )
    }

    /// Same as [`run`](Self::run), from the individual document fields.
    pub fn run_parts(
        &self,
        document_name: &str,
        document_body: &str,
        document_created_at: chrono::DateTime<chrono::Utc>,
        document_url: &str,
        target_name_pattern: &str,
        reference: NaiveDate,
    ) -> Result<Vec<ActionItem>, ExtractError> {
        let extractor = ActionItemExtractor::new(target_name_pattern, &self.config)?;
        let meeting =
            self.meeting
                .extract(document_name, document_body, document_created_at, document_url);

        let candidates = extractor.extract(document_body, &meeting, reference);
        let candidate_count = candidates.len();
        let items = dedupe(candidates);

        info!(
            title = %meeting.title,
            candidates = candidate_count,
            items = items.len(),
            "Document extracted"
        );
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn doc(name: &str, body: &str) -> SourceDocument {
        SourceDocument {
            id: "doc-1".to_string(),
            name: name.to_string(),
            body: body.to_string(),
            created_at: DateTime::<Utc>::from_timestamp(1_791_536_000, 0).unwrap(),
            url: "https://docs.example.com/d/1".to_string(),
        }
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    #[test]
    fn test_pipeline_dedupes_overlapping_cues() {
        let document = doc(
            "Weekly Sync - Anotações do Gemini",
            "- Filipe - share the slides with the board",
        );
        let items = ExtractionPipeline::default()
            .run(&document, "Filipe", reference())
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].task, "share the slides with the board");
        assert_eq!(items[0].meeting_title, "Weekly Sync");
    }

    #[test]
    fn test_pipeline_invalid_pattern() {
        let err = ExtractionPipeline::default()
            .run(&doc("x", "Filipe will go home early"), "(", reference())
            .unwrap_err();
        assert!(matches!(err, ExtractError::InvalidPattern { .. }));
    }

    #[test]
    fn test_pipeline_no_items() {
        let items = ExtractionPipeline::default()
            .run(&doc("x", "Nothing assigned today."), "Filipe", reference())
            .unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_pipeline_uses_configured_sentinel() {
        let config = ExtractionConfig {
            untitled_title: "Reunião sem título".to_string(),
            ..ExtractionConfig::default()
        };
        let items = ExtractionPipeline::new(config)
            .run(
                &doc("Anotações do Gemini", "@Filipe: book the room"),
                "Filipe",
                reference(),
            )
            .unwrap();
        assert_eq!(items[0].meeting_title, "Reunião sem título");
    }

    #[test]
    fn test_pipeline_respects_min_task_chars() {
        let config = ExtractionConfig {
            min_task_chars: 20,
            ..ExtractionConfig::default()
        };
        let items = ExtractionPipeline::new(config)
            .run(&doc("x", "@Filipe: book the room"), "Filipe", reference())
            .unwrap();
        assert!(items.is_empty());
    }
}

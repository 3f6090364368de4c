//! Processing run.
//!
//! Walks the documents of a source in order, skips already-processed ones,
//! extracts action items and creates one card per item.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use minuta_core::error::Result;
use minuta_extract::ExtractionPipeline;

use crate::sink::{CardRequest, CardSink, TaskRewriter};
use crate::source::DocumentSource;
use crate::tracker::ProcessedSet;

/// Per-run inputs that do not come from the collaborators.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub target_name_pattern: String,
    pub reference: NaiveDate,
    /// Create cards but leave the processed set untouched.
    pub dry_run: bool,
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub seen: usize,
    pub skipped: usize,
    pub failed: usize,
    pub processed: usize,
    pub cards_created: usize,
    pub cards_failed: usize,
}

pub struct ProcessingRun<'a> {
    source: &'a dyn DocumentSource,
    pipeline: &'a ExtractionPipeline,
    rewriter: &'a dyn TaskRewriter,
    sink: &'a dyn CardSink,
}

impl<'a> ProcessingRun<'a> {
    pub fn new(
        source: &'a dyn DocumentSource,
        pipeline: &'a ExtractionPipeline,
        rewriter: &'a dyn TaskRewriter,
        sink: &'a dyn CardSink,
    ) -> Self {
        Self {
            source,
            pipeline,
            rewriter,
            sink,
        }
    }

    /// Run once over the source. Only a failure to list documents aborts the
    /// run; per-document and per-card failures are counted.
    pub async fn execute(
        &self,
        tracker: &mut ProcessedSet,
        options: &RunOptions,
    ) -> Result<RunSummary> {
        let documents = self.source.list_documents().await?;
        let mut summary = RunSummary::default();

        for document in documents {
            summary.seen += 1;
            if tracker.contains(&document.id) {
                debug!(id = %document.id, "Already processed");
                summary.skipped += 1;
                continue;
            }

            let items = match self.pipeline.run(
                &document,
                &options.target_name_pattern,
                options.reference,
            ) {
                Ok(items) => items,
                Err(e) => {
                    warn!(id = %document.id, error = %e, "Extraction failed");
                    summary.failed += 1;
                    continue;
                }
            };

            let mut all_created = true;
            for item in items {
                let created = match self.rewriter.rewrite(&item).await {
                    Ok(title) => {
                        let card = CardRequest::new(title, item);
                        self.sink.create_card(&card).await
                    }
                    Err(e) => Err(e),
                };
                match created {
                    Ok(()) => summary.cards_created += 1,
                    Err(e) => {
                        warn!(id = %document.id, error = %e, "Card creation failed");
                        summary.cards_failed += 1;
                        all_created = false;
                    }
                }
            }

            if !all_created {
                continue;
            }
            summary.processed += 1;
            if !options.dry_run {
                tracker.insert(document.id.clone());
            }
            info!(id = %document.id, name = %document.name, "Document processed");
        }

        info!(
            seen = summary.seen,
            skipped = summary.skipped,
            failed = summary.failed,
            cards = summary.cards_created,
            "Run complete"
        );
        Ok(summary)
    }
}

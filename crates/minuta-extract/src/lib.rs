//! Extraction engine for Minuta.
//!
//! Scans meeting-notes text for action items assigned to one person,
//! resolves their due dates, derives meeting metadata, and collapses
//! near-duplicates.

pub mod calendar;
pub mod dedup;
pub mod due_date;
pub mod error;
pub mod extractor;
pub mod meeting;
pub mod normalize;
pub mod patterns;
pub mod pipeline;

pub use dedup::{dedupe, is_near_duplicate};
pub use due_date::DueDateResolver;
pub use error::ExtractError;
pub use extractor::ActionItemExtractor;
pub use meeting::MeetingInfoExtractor;
pub use normalize::clean;
pub use patterns::{CompiledCue, CuePattern, CUE_PATTERNS};
pub use pipeline::ExtractionPipeline;

//! Two-pass action-item scanner.
//!
//! Pass A matches the inline cue table over the whole text. Pass B scans
//! line by line inside the "suggested next steps" section of generated
//! meeting notes. Both passes feed one candidate list; overlap between them
//! is expected and absorbed by deduplication.

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use minuta_core::config::ExtractionConfig;
use minuta_core::types::{ActionItem, MeetingInfo};

use crate::dedup::contains_near_duplicate;
use crate::due_date::DueDateResolver;
use crate::error::ExtractError;
use crate::normalize::clean;
use crate::patterns::{compile_cues, compile_name, CompiledCue, CUE_PATTERNS};

/// Headings that open the suggested-next-steps section of generated notes.
pub const SECTION_HEADINGS: [&str; 2] =
    ["Próximas etapas sugeridas", "Próximos passos sugeridos"];

/// Finds action items for one target name.
pub struct ActionItemExtractor {
    cues: Vec<CompiledCue>,
    name: Regex,
    heading: Regex,
    section_starts: Vec<String>,
    resolver: DueDateResolver,
    min_task_chars: usize,
    date_window_chars: usize,
}

impl ActionItemExtractor {
    /// Compile the cue table for `target_name_pattern`.
    ///
    /// The pattern is a regex fragment and is not escaped here.
    pub fn new(
        target_name_pattern: &str,
        config: &ExtractionConfig,
    ) -> Result<Self, ExtractError> {
        let cues = compile_cues(CUE_PATTERNS, target_name_pattern)?;
        let name = compile_name(target_name_pattern)?;
        debug!(
            pattern = target_name_pattern,
            cues = cues.len(),
            "Action item extractor ready"
        );

        Ok(Self {
            cues,
            name,
            heading: Regex::new(r"^\p{Lu}\P{Ll}*$").expect("Invalid heading regex"),
            section_starts: SECTION_HEADINGS.iter().map(|h| h.to_lowercase()).collect(),
            resolver: DueDateResolver::new(),
            min_task_chars: config.min_task_chars,
            date_window_chars: config.date_window_chars,
        })
    }

    /// Collect candidate action items from `text`. Not deduplicated.
    pub fn extract(
        &self,
        text: &str,
        meeting: &MeetingInfo,
        reference: NaiveDate,
    ) -> Vec<ActionItem> {
        let mut items = self.inline_pass(text, meeting, reference);
        let inline_count = items.len();
        self.section_pass(text, meeting, reference, &mut items);
        debug!(
            inline = inline_count,
            section = items.len() - inline_count,
            "Candidates collected"
        );
        items
    }

    /// Pass A: every cue shape over the whole text.
    fn inline_pass(
        &self,
        text: &str,
        meeting: &MeetingInfo,
        reference: NaiveDate,
    ) -> Vec<ActionItem> {
        let mut items = Vec::new();
        for cue in &self.cues {
            for caps in cue.regex.captures_iter(text) {
                let Some(whole) = caps.get(0) else { continue };
                let Some(description) = cue.description(&caps) else { continue };

                let task = self.tidy_task(description);
                if !self.is_long_enough(&task) {
                    continue;
                }

                let window = date_window(text, whole.start(), whole.end(), self.date_window_chars);
                let due_date = self.resolver.resolve(window, reference);
                debug!(cue = cue.name, %task, ?due_date, "Inline cue matched");
                items.push(ActionItem::new(
                    task,
                    due_date,
                    meeting,
                    whole.as_str().to_string(),
                ));
            }
        }
        items
    }

    /// Pass B: lines mentioning the target inside the next-steps section.
    fn section_pass(
        &self,
        text: &str,
        meeting: &MeetingInfo,
        reference: NaiveDate,
        items: &mut Vec<ActionItem>,
    ) {
        let lines: Vec<&str> = text.lines().collect();
        let mut inside = false;

        for (i, line) in lines.iter().enumerate() {
            if self.is_section_start(line) {
                inside = true;
                continue;
            }
            if !inside {
                continue;
            }
            if self.is_heading(line) {
                inside = false;
                continue;
            }
            if !self.name.is_match(line) {
                continue;
            }

            let without_name = self.name.replacen(line, 1, "");
            let task = self.tidy_task(&without_name);
            if !self.is_long_enough(&task) || contains_near_duplicate(items, &task) {
                continue;
            }

            let next = lines.get(i + 1).copied().unwrap_or("");
            let context = format!("{} {}", line, next);
            let due_date = self.resolver.resolve(&context, reference);
            debug!(%task, ?due_date, "Section line matched");
            items.push(ActionItem::new(
                task,
                due_date,
                meeting,
                line.trim().to_string(),
            ));
        }
    }

    /// Remove the due-date cue and trailing punctuation, then clean.
    fn tidy_task(&self, description: &str) -> String {
        let without_cue = match self.resolver.find_cue(description) {
            Some(cue) => format!(
                "{} {}",
                &description[..cue.span.start],
                &description[cue.span.end..]
            ),
            None => description.to_string(),
        };
        let cleaned = clean(&without_cue);
        clean(cleaned.trim_end_matches(|c: char| matches!(c, '.' | ';' | ',')))
    }

    fn is_long_enough(&self, task: &str) -> bool {
        task.chars().count() > self.min_task_chars
    }

    fn is_section_start(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.section_starts.iter().any(|h| lower.contains(h.as_str()))
    }

    /// All-caps-looking line: upper-case first character, no lower-case
    /// letters, longer than three characters.
    fn is_heading(&self, line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.chars().count() > 3 && self.heading.is_match(trimmed)
    }
}

/// `text[start..]` up to `window_chars` characters, never shorter than the
/// match itself.
fn date_window(text: &str, start: usize, match_end: usize, window_chars: usize) -> &str {
    let limit = text[start..]
        .char_indices()
        .nth(window_chars)
        .map_or(text.len(), |(offset, _)| start + offset);
    &text[start..limit.max(match_end)]
}

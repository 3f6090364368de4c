//! Meeting metadata derivation from a document's name and body.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use regex::Regex;
use tracing::debug;

use minuta_core::types::{MeetingInfo, UNTITLED_MEETING};

use crate::calendar::{parse_calendar_phrase, NumericOrder, MONTH_NAME};
use crate::normalize::clean;

/// Trailing marker of machine-generated meeting-notes documents.
pub const GENERATED_NOTES_SUFFIX: &str = "Anotações do Gemini";

/// Derives `MeetingInfo` for one document.
pub struct MeetingInfoExtractor {
    untitled_title: String,
    suffix: Regex,
    parenthesized_stamp: Regex,
    meet_stamp: Regex,
    body_dates: Vec<Regex>,
}

impl Default for MeetingInfoExtractor {
    fn default() -> Self {
        Self::new(UNTITLED_MEETING)
    }
}

impl MeetingInfoExtractor {
    pub fn new(untitled_title: &str) -> Self {
        Self {
            untitled_title: untitled_title.to_string(),
            suffix: Regex::new(&format!(
                r"(?i)\s*[-–—|]?\s*{}\s*$",
                regex::escape(GENERATED_NOTES_SUFFIX)
            ))
            .expect("Invalid title suffix regex"),
            parenthesized_stamp: Regex::new(r"\s*\([^()]*\d[^()]*\)\s*$")
                .expect("Invalid parenthesized stamp regex"),
            meet_stamp: Regex::new(
                r"\s*[-–—]\s*\d{4}/\d{1,2}/\d{1,2}(?:\s+\d{1,2}:\d{2})?(?:\s+[A-Z]{2,4}[+-]\d{1,2}(?::\d{2})?)?\s*$",
            )
            .expect("Invalid meet stamp regex"),
            body_dates: vec![
                Regex::new(r"(?im)\b(?:date|data):\s*([^\n]+)").expect("Invalid date label regex"),
                Regex::new(&format!(
                    r"(?i)\b({MONTH_NAME}\.?\s+\d{{1,2}}(?:st|nd|rd|th)?,\s*\d{{4}})\b"
                ))
                .expect("Invalid month-day-year regex"),
                Regex::new(r"\b(\d{1,2}/\d{1,2}/\d{4})\b").expect("Invalid numeric date regex"),
            ],
        }
    }

    /// Derive the meeting title and date for one document.
    pub fn extract(
        &self,
        document_name: &str,
        document_body: &str,
        document_created_at: DateTime<Utc>,
        document_url: &str,
    ) -> MeetingInfo {
        let title = self.title(document_name);
        let date = self
            .body_date(document_body, document_created_at.year())
            .unwrap_or_else(|| document_created_at.date_naive());
        debug!(%title, %date, "Meeting info derived");

        MeetingInfo {
            title,
            date,
            document_url: document_url.to_string(),
        }
    }

    /// Meeting title from a document name, or the untitled sentinel.
    pub fn title(&self, document_name: &str) -> String {
        let stripped = self.suffix.replace(document_name, "");
        let stripped = self.parenthesized_stamp.replace(&stripped, "");
        let stripped = self.meet_stamp.replace(&stripped, "");
        let title = clean(&stripped);
        if title.is_empty() {
            self.untitled_title.clone()
        } else {
            title
        }
    }

    /// First date phrase in the body that forms a valid calendar date.
    ///
    /// Numeric dates in meeting bodies are read day first.
    pub fn body_date(&self, body: &str, default_year: i32) -> Option<NaiveDate> {
        self.body_dates.iter().find_map(|re| {
            re.captures_iter(body).find_map(|caps| {
                let phrase = caps.get(1)?.as_str();
                parse_calendar_phrase(phrase, default_year, NumericOrder::DayFirst)
                    .map(|parsed| parsed.date)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> MeetingInfoExtractor {
        MeetingInfoExtractor::default()
    }

    fn created() -> DateTime<Utc> {
        // 2026-10-09T08:53:20Z
        DateTime::from_timestamp(1_791_536_000, 0).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // =====================================================================
    // Title derivation
    // =====================================================================

    #[test]
    fn test_title_strips_generated_suffix() {
        assert_eq!(extractor().title("Weekly Sync - Anotações do Gemini"), "Weekly Sync");
    }

    #[test]
    fn test_title_suffix_is_case_insensitive() {
        assert_eq!(extractor().title("Planning – anotações do gemini"), "Planning");
    }

    #[test]
    fn test_title_strips_parenthesized_stamp() {
        assert_eq!(
            extractor().title("Kickoff (2026-10-09 14:00) - Anotações do Gemini"),
            "Kickoff"
        );
    }

    #[test]
    fn test_title_keeps_parenthesized_words() {
        assert_eq!(extractor().title("Sync (Team Blue)"), "Sync (Team Blue)");
    }

    #[test]
    fn test_title_strips_meet_timestamp() {
        assert_eq!(
            extractor().title("Weekly Sync - 2026/10/09 14:00 GMT-03:00 - Anotações do Gemini"),
            "Weekly Sync"
        );
    }

    #[test]
    fn test_title_without_suffix_is_unchanged() {
        assert_eq!(extractor().title("  Retro notes "), "Retro notes");
    }

    #[test]
    fn test_empty_title_uses_sentinel() {
        assert_eq!(extractor().title("Anotações do Gemini"), "Untitled Meeting");
        assert_eq!(extractor().title(""), "Untitled Meeting");
        assert_eq!(MeetingInfoExtractor::new("Sem título").title(" - "), "Sem título");
    }

    // =====================================================================
    // Date derivation
    // =====================================================================

    #[test]
    fn test_date_label_wins() {
        let body = "Date: October 7, 2026\nAttendees: Filipe, Ana\nLater on 12/11/2026";
        assert_eq!(extractor().body_date(body, 2026), Some(ymd(2026, 10, 7)));
    }

    #[test]
    fn test_bare_month_day_year() {
        let body = "Notes from the call held on Sep 30, 2026 with the vendor.";
        assert_eq!(extractor().body_date(body, 2026), Some(ymd(2026, 9, 30)));
    }

    #[test]
    fn test_numeric_body_date_is_day_first() {
        let body = "Reunião de 07/10/2026";
        assert_eq!(extractor().body_date(body, 2026), Some(ymd(2026, 10, 7)));
    }

    #[test]
    fn test_unparseable_label_falls_through() {
        let body = "Date: to be confirmed\nHeld 30/09/2026";
        assert_eq!(extractor().body_date(body, 2026), Some(ymd(2026, 9, 30)));
    }

    #[test]
    fn test_invalid_numeric_date_is_skipped() {
        let body = "Ref 45/13/2026 then 01/02/2026";
        assert_eq!(extractor().body_date(body, 2026), Some(ymd(2026, 2, 1)));
    }

    #[test]
    fn test_extract_falls_back_to_created_at() {
        let info = extractor().extract(
            "Weekly Sync - Anotações do Gemini",
            "No dates in here.",
            created(),
            "https://docs.example.com/d/1",
        );
        assert_eq!(info.title, "Weekly Sync");
        assert_eq!(info.date, created().date_naive());
        assert_eq!(info.document_url, "https://docs.example.com/d/1");
    }
}

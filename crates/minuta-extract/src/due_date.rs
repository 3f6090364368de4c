//! Due-date resolution from natural-language phrases.
//!
//! Recognizes a fixed, ordered set of English due-date cues ("by Friday",
//! "by March 3rd", "due date: Oct 16", "by eow", "by 10/16",
//! "deadline: ...") and resolves them against an injected reference date.

use std::ops::Range;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use regex::Regex;
use tracing::debug;

use crate::calendar::{parse_calendar_phrase, NumericOrder, MONTH_NAME, WEEKDAY_NAME};

/// The shape of a recognized due-date phrase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueKind {
    /// `by <weekday>`
    Weekday,
    /// `by <month> <day>[, <year>]`
    MonthDay,
    /// `due[ date]: <month> <day>...`
    DueLabel,
    /// `by end of week|day`, `by eow`, `by eod`
    EndOf,
    /// `by M/D[/YYYY]`
    Numeric,
    /// `deadline: <free text>`
    Deadline,
}

struct DueCue {
    kind: CueKind,
    regex: Regex,
}

/// A due-date phrase located in some text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DueCueMatch {
    pub kind: CueKind,
    /// Byte span of the whole cue, including the leading `by`/`due:`.
    pub span: Range<usize>,
    /// The captured date phrase.
    pub phrase: String,
}

/// Resolves due-date phrases to calendar dates.
///
/// Cues are tried in precedence order and the first one that matches
/// anywhere in the text wins.
pub struct DueDateResolver {
    cues: Vec<DueCue>,
}

impl Default for DueDateResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DueDateResolver {
    pub fn new() -> Self {
        let month_day = format!(
            r"{MONTH_NAME}\.?\s+\d{{1,2}}(?:st|nd|rd|th)?\b(?:,?\s*\d{{4}}\b)?"
        );
        let table: Vec<(CueKind, String)> = vec![
            (CueKind::Weekday, format!(r"(?i)\bby\s+({WEEKDAY_NAME})\b")),
            (CueKind::MonthDay, format!(r"(?i)\bby\s+({month_day})")),
            (
                CueKind::DueLabel,
                format!(r"(?i)\bdue(?:\s+date)?:\s*({month_day})"),
            ),
            (
                CueKind::EndOf,
                r"(?i)\bby\s+(end\s+of\s+(?:the\s+)?(?:week|day)|eow|eod)\b".to_string(),
            ),
            (
                CueKind::Numeric,
                r"(?i)\bby\s+(\d{1,2}/\d{1,2}(?:/\d{4})?)\b".to_string(),
            ),
            (CueKind::Deadline, r"(?i)\bdeadline:\s*([^.,\n]+)".to_string()),
        ];

        let cues = table
            .into_iter()
            .map(|(kind, pat)| DueCue {
                kind,
                regex: Regex::new(&pat).expect("Invalid due-date regex"),
            })
            .collect();

        Self { cues }
    }

    /// Locate the highest-precedence due-date cue in `text`.
    pub fn find_cue(&self, text: &str) -> Option<DueCueMatch> {
        self.cues.iter().find_map(|cue| {
            let caps = cue.regex.captures(text)?;
            let whole = caps.get(0)?;
            let phrase = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
            Some(DueCueMatch {
                kind: cue.kind,
                span: whole.range(),
                phrase,
            })
        })
    }

    /// Resolve the due date expressed in `context`, relative to `reference`.
    ///
    /// Never fails: unrecognized or unparseable phrases yield `None`.
    pub fn resolve(&self, context: &str, reference: NaiveDate) -> Option<NaiveDate> {
        let cue = self.find_cue(context)?;
        let resolved = match cue.kind {
            CueKind::Weekday => weekday_from_name(&cue.phrase)
                .and_then(|target| next_weekday(reference, target)),
            CueKind::EndOf => {
                let phrase = cue.phrase.to_lowercase();
                if phrase == "eow" || phrase.ends_with("week") {
                    next_weekday(reference, Weekday::Fri)
                } else {
                    Some(reference)
                }
            }
            CueKind::MonthDay | CueKind::DueLabel | CueKind::Numeric | CueKind::Deadline => {
                resolve_calendar(&cue.phrase, reference)
            }
        };
        debug!(kind = ?cue.kind, phrase = %cue.phrase, ?resolved, "Due-date cue resolved");
        resolved
    }
}

/// Next occurrence of `target` strictly after `reference`. On the same
/// weekday this is seven days later, never the same day.
pub fn next_weekday(reference: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let today = reference.weekday().num_days_from_monday();
    let wanted = target.num_days_from_monday();
    let ahead = match (wanted + 7 - today) % 7 {
        0 => 7,
        n => n,
    };
    reference.checked_add_days(Days::new(u64::from(ahead)))
}

/// Years searched for the next occurrence of a date without a year. Four
/// covers Feb 29 from any reference date.
const ROLLOVER_YEARS: i32 = 4;

fn resolve_calendar(phrase: &str, reference: NaiveDate) -> Option<NaiveDate> {
    // An omitted year means the next occurrence on or after the reference,
    // which for Feb 29 may be several years out.
    for offset in 0..=ROLLOVER_YEARS {
        let year = reference.year() + offset;
        let Some(parsed) = parse_calendar_phrase(phrase, year, NumericOrder::MonthFirst) else {
            continue;
        };
        if parsed.explicit_year || parsed.date >= reference {
            return Some(parsed.date);
        }
    }
    None
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    let weekday = match name.to_lowercase().as_str() {
        "monday" => Weekday::Mon,
        "tuesday" => Weekday::Tue,
        "wednesday" => Weekday::Wed,
        "thursday" => Weekday::Thu,
        "friday" => Weekday::Fri,
        "saturday" => Weekday::Sat,
        "sunday" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

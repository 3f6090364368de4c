//! Generic calendar-phrase parsing.
//!
//! Turns short captured phrases such as "March 1st, 2027", "1 March",
//! "2026-10-16" or "10/16" into calendar dates. Shared by the due-date
//! resolver and the meeting-date derivation.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// Month-name alternation (full names and common abbreviations), for use
/// inside larger patterns.
pub const MONTH_NAME: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

/// Weekday-name alternation, for use inside larger patterns.
pub const WEEKDAY_NAME: &str =
    r"(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday)";

/// Field order for purely numeric dates such as `3/4/2026`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericOrder {
    /// `M/D[/Y]`
    MonthFirst,
    /// `D/M[/Y]`
    DayFirst,
}

/// A parsed calendar date and whether the phrase spelled out its year.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedDate {
    pub date: NaiveDate,
    pub explicit_year: bool,
}

struct CalendarPatterns {
    iso: Regex,
    month_day: Regex,
    day_month: Regex,
    numeric: Regex,
}

fn patterns() -> &'static CalendarPatterns {
    static RE: OnceLock<CalendarPatterns> = OnceLock::new();
    RE.get_or_init(|| CalendarPatterns {
        iso: Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})\b").expect("Invalid ISO date regex"),
        month_day: Regex::new(&format!(
            r"(?i)^(?:{WEEKDAY_NAME},?\s+)?({MONTH_NAME})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?\b(?:,?\s*(\d{{4}})\b)?"
        ))
        .expect("Invalid month-day regex"),
        day_month: Regex::new(&format!(
            r"(?i)^(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({MONTH_NAME})\b\.?(?:,?\s*(\d{{4}})\b)?"
        ))
        .expect("Invalid day-month regex"),
        numeric: Regex::new(r"^(\d{1,2})/(\d{1,2})(?:/(\d{4}))?\b")
            .expect("Invalid numeric date regex"),
    })
}

/// Map an English month name or abbreviation to its number (1-12).
pub fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.trim_end_matches('.').to_lowercase();
    let month = match lower.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Parse a calendar phrase at the start of `text`.
///
/// Phrases without a year are placed in `default_year`. Returns `None` when
/// nothing recognizable is found or the fields do not form a real date.
pub fn parse_calendar_phrase(
    text: &str,
    default_year: i32,
    order: NumericOrder,
) -> Option<ParsedDate> {
    let text = text.trim();
    let p = patterns();

    if let Some(caps) = p.iso.captures(text) {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        return build(year, month, day, true);
    }

    if let Some(caps) = p.month_day.captures(text) {
        let month = month_from_name(&caps[1])?;
        let day = caps[2].parse().ok()?;
        return with_optional_year(caps.get(3).map(|m| m.as_str()), default_year, month, day);
    }

    if let Some(caps) = p.day_month.captures(text) {
        let day = caps[1].parse().ok()?;
        let month = month_from_name(&caps[2])?;
        return with_optional_year(caps.get(3).map(|m| m.as_str()), default_year, month, day);
    }

    if let Some(caps) = p.numeric.captures(text) {
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[2].parse().ok()?;
        let (month, day) = match order {
            NumericOrder::MonthFirst => (first, second),
            NumericOrder::DayFirst => (second, first),
        };
        return with_optional_year(caps.get(3).map(|m| m.as_str()), default_year, month, day);
    }

    None
}

fn with_optional_year(
    year: Option<&str>,
    default_year: i32,
    month: u32,
    day: u32,
) -> Option<ParsedDate> {
    match year {
        Some(y) => build(y.parse().ok()?, month, day, true),
        None => build(default_year, month, day, false),
    }
}

fn build(year: i32, month: u32, day: u32, explicit_year: bool) -> Option<ParsedDate> {
    NaiveDate::from_ymd_opt(year, month, day).map(|date| ParsedDate {
        date,
        explicit_year,
    })
}

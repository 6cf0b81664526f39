//! Date-range and time-of-day expressions accepted on the command line.
//!
//! - `today`, `tomorrow`, `2025-05-02`: a single day
//! - `thursday`, `thu`: the next such weekday, today included
//! - any of the above with `+N`: that day through N days later
//! - `2025-05-02..2025-05-09`: an explicit inclusive range

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("Invalid date range '{0}': expected today, tomorrow, a weekday, or YYYY-MM-DD, optionally followed by +N")]
    DateRange(String),

    #[error("Invalid time '{0}': expected HH:MM")]
    TimeOfDay(String),
}

/// Parse a date-range expression relative to `today`.
///
/// An empty expression means `today`. Returns the inclusive `(start, end)` dates.
pub fn parse_date_range(expr: &str, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), ParseError> {
    let expr = expr.trim().to_lowercase();
    let invalid = || ParseError::DateRange(expr.clone());

    if expr.is_empty() {
        return Ok((today, today));
    }

    if let Some((from, to)) = expr.split_once("..") {
        let start = parse_iso(from).ok_or_else(invalid)?;
        let end = parse_iso(to).ok_or_else(invalid)?;
        if end < start {
            return Err(invalid());
        }
        return Ok((start, end));
    }

    let (anchor, offset) = match expr.split_once('+') {
        Some((anchor, offset)) => (anchor, offset.trim().parse::<u64>().map_err(|_| invalid())?),
        None => (expr.as_str(), 0),
    };

    let start = resolve_anchor(anchor.trim(), today).ok_or_else(invalid)?;
    let end = start.checked_add_days(Days::new(offset)).ok_or_else(invalid)?;
    Ok((start, end))
}

fn resolve_anchor(anchor: &str, today: NaiveDate) -> Option<NaiveDate> {
    match anchor {
        "today" => Some(today),
        "tomorrow" => today.succ_opt(),
        _ => {
            if let Ok(weekday) = anchor.parse::<Weekday>() {
                return Some(next_weekday(today, weekday));
            }
            parse_iso(anchor)
        }
    }
}

fn parse_iso(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// The first date on or after `today` that falls on `weekday`.
fn next_weekday(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let ahead = (7 + weekday.num_days_from_monday() - today.weekday().num_days_from_monday()) % 7;
    today + Days::new(u64::from(ahead))
}

/// Parse `HH:MM` (or `HH:MM:SS`) into a time of day.
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime, ParseError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| ParseError::TimeOfDay(s.to_string()))
}

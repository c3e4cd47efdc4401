use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::table::utils::{clean_str, is_eight_digit_token};

const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m/%d/%y", "%d-%b-%Y", "%d-%b-%y", "%B %d, %Y",
    "%b %d, %Y", "%b %d, %y",
];

// chrono's `%Y` takes 1-4 digits, so "6/30/20" would otherwise land in year 20.
const MIN_YEAR: i32 = 1000;

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
];

/// Strict `YYYYMMDD` → date.
pub fn parse_yyyymmdd(s: &str) -> Option<NaiveDate> {
    if !is_eight_digit_token(s) {
        return None;
    }
    let year: i32 = s[0..4].parse().ok()?;
    let month: u32 = s[4..6].parse().ok()?;
    let day: u32 = s[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Report date from a raw cell: strict `YYYYMMDD`, else a handful of common
/// date and date-time layouts (time of day dropped).
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    let s = clean_str(raw);
    if s.is_empty() {
        return None;
    }
    if let Some(date) = parse_yyyymmdd(&s) {
        return Some(date);
    }

    // Some exports carry a fractional part or an offset after the time.
    let base = s.split(['.', '+', 'Z']).next().unwrap_or(&s).trim();

    DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(&s, fmt).ok())
        .chain(
            DATETIME_FORMATS
                .iter()
                .filter_map(|fmt| NaiveDateTime::parse_from_str(base, fmt).ok())
                .map(|dt| dt.date()),
        )
        .find(|date| date.year() >= MIN_YEAR)
}

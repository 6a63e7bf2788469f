use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// The calendar date attached to a transaction.
///
/// Source files mix date formats across batches, so a date that cannot be
/// read in any supported format is kept as `Invalid` alongside its raw text
/// rather than rejecting the record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TxDate {
    Valid(NaiveDate),
    Invalid(String),
}

impl TxDate {
    pub fn is_valid(&self) -> bool {
        matches!(self, TxDate::Valid(_))
    }

    #[cfg(test)]
    fn as_date(&self) -> Option<NaiveDate> {
        match self {
            TxDate::Valid(date) => Some(*date),
            TxDate::Invalid(_) => None,
        }
    }
}

impl fmt::Display for TxDate {
    /// Valid dates render as `d/M/yyyy`, the same shape the primary input
    /// format uses.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxDate::Valid(date) => {
                write!(f, "{}/{}/{:04}", date.day(), date.month(), date.year())
            }
            TxDate::Invalid(_) => write!(f, "Invalid DateTime"),
        }
    }
}

/// Parse a textual date, first as `d/M/yyyy` and then as ISO-8601.
///
/// This never fails; callers must check [`TxDate::is_valid`].
pub fn parse_date(raw: &str) -> TxDate {
    if let Some(date) = parse_day_month_year(raw) {
        return TxDate::Valid(date);
    }

    match parse_iso8601(raw) {
        Some(date) => TxDate::Valid(date),
        None => TxDate::Invalid(raw.to_string()),
    }
}

/// Day and month may be one or two digits, the year must be exactly four.
fn parse_day_month_year(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.split('/');
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let day = parse_digits(day, 1..=2)?;
    let month = parse_digits(month, 1..=2)?;
    let year = parse_digits(year, 4..=4)?;

    NaiveDate::from_ymd_opt(year as i32, month, day)
}

fn parse_digits(part: &str, width: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !width.contains(&part.len()) || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    part.parse().ok()
}

fn parse_iso8601(raw: &str) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(timestamp.date());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

//! Date formats found in imageboard APIs.
use chrono::{DateTime, NaiveDateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `2015-01-03T12:00:00.000-05:00`
    Rfc3339,
    /// A `chrono` format string including a UTC offset, e.g. `%a %b %d %H:%M:%S %z %Y`.
    WithOffset(&'static str),
    /// A `chrono` format string without offset. The date is assumed to be UTC.
    Naive(&'static str),
    /// Seconds since the Unix epoch.
    UnixSeconds,
}

impl DateFormat {
    fn parse(self, date: &str) -> Option<DateTime<Utc>> {
        match self {
            Self::Rfc3339 => DateTime::parse_from_rfc3339(date)
                .ok()
                .map(|d| d.with_timezone(&Utc)),
            Self::WithOffset(fmt) => DateTime::parse_from_str(date, fmt)
                .ok()
                .map(|d| d.with_timezone(&Utc)),
            Self::Naive(fmt) => NaiveDateTime::parse_from_str(date, fmt)
                .ok()
                .map(|d| d.and_utc()),
            Self::UnixSeconds => {
                if date.is_empty() || !date.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                date.parse::<i64>()
                    .ok()
                    .and_then(|secs| DateTime::from_timestamp(secs, 0))
            }
        }
    }
}

/// Tries every format in order and returns the first successful parse.
pub fn parse_date(date: &str, formats: &[DateFormat]) -> Option<DateTime<Utc>> {
    let date = date.trim();
    formats.iter().find_map(|f| f.parse(date))
}

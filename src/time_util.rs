//! Lenient parsing for backend timestamps.
//!
//! The backend emits RFC 3339 for new records, but older rows carry naive
//! ISO 8601 datetimes or bare dates. All three are accepted; naive values are
//! taken as UTC.

#[cfg(test)]
#[path = "time_util_test.rs"]
mod time_util_test;

use time::format_description::well_known::{Iso8601, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

/// Parse a backend timestamp, `None` if no accepted format matches.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }
    if let Ok(ts) = PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT) {
        return Some(ts.assume_utc());
    }
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

/// Whole days from `now` until `until`, truncated toward zero.
#[must_use]
pub fn whole_days_between(now: OffsetDateTime, until: OffsetDateTime) -> i64 {
    (until - now).whole_days()
}

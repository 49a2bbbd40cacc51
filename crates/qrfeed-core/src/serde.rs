// Module name shadows the `serde` crate; use `::serde` for the external crate.
use ::serde::Serializer;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// `2025-03-15T12:00:00.000Z`: UTC, millisecond precision, `Z` suffix.
pub fn to_rfc3339_ms<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Calendar day as `YYYY-MM-DD`, the key used for daily trend points.
pub fn to_iso_date<S>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.collect_str(&date.format("%Y-%m-%d"))
}

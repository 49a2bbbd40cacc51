//! Timestamp fixtures.

use chrono::{DateTime, TimeZone, Utc};

/// Build a UTC instant. Panics on an invalid calendar date.
pub fn ts(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid fixture timestamp {year}-{month}-{day} {hour}:{minute}"))
}

/// Fixed reference instant used across service tests: 2025-03-15 12:00 UTC.
pub fn reference_now() -> DateTime<Utc> {
    ts(2025, 3, 15, 12, 0)
}

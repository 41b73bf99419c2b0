//! Wall-clock helpers. The engine itself never reads the clock; callers
//! sample it here and pass explicit `now_ms` values in.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds in one hour.
pub const HOUR_MS: u64 = 3_600_000;

/// Current time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// UTC hour of day (0..=23) for a millisecond timestamp.
#[must_use]
pub const fn hour_of_day(at_ms: u64) -> u8 {
    ((at_ms / HOUR_MS) % 24) as u8
}

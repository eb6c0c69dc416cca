//! Time related utils.

use chrono::Utc;

/// DateTime is the UTC timestamp type used across nsfetch.
pub type DateTime = chrono::DateTime<Utc>;

/// Create a new DateTime with current time.
#[inline]
pub fn now() -> DateTime {
    Utc::now()
}

/// Convert a Unix timestamp in seconds into a DateTime.
///
/// Returns `None` if the timestamp is out of range.
pub fn from_unix_seconds(secs: i64) -> Option<DateTime> {
    chrono::DateTime::from_timestamp(secs, 0)
}

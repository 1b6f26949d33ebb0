//! Time related utils.

use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Compact ISO 8601 format: "20220313T072004Z"
const ISO8601: &str = "%Y%m%dT%H%M%SZ";

/// Create a new DateTime with current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into compact ISO 8601 with punctuation stripped: `20220313T072004Z`
///
/// Sub-second precision is dropped.
pub fn format_iso8601(t: DateTime) -> String {
    t.format(ISO8601).to_string()
}

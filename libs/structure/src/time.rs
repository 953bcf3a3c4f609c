//! ISO-8601 rendering of epoch milliseconds

use chrono::{SecondsFormat, TimeZone, Utc};

/// Render epoch milliseconds as `YYYY-MM-DDTHH:MM:SS.mmmZ`, the exact form
/// venue `datetime` fields are compared against. `None` when the instant is
/// outside chrono's representable range.
pub fn iso8601(millis: i64) -> Option<String> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|instant| instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}

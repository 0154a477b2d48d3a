use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Format used for note stamps; lexical order equals chronological order.
pub const STAMP_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Convert epoch milliseconds to wall-clock time in `tz`.
///
/// Milliseconds are floored to whole seconds. Returns `None` when the
/// timestamp is out of range.
pub fn local_datetime<Tz: TimeZone>(millis: i64, tz: &Tz) -> Option<NaiveDateTime> {
    let utc = DateTime::<Utc>::from_timestamp(millis.div_euclid(1000), 0)?;
    Some(utc.with_timezone(tz).naive_local())
}

pub fn format_stamp(local: &NaiveDateTime) -> String {
    local.format(STAMP_FORMAT).to_string()
}

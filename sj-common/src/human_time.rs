//! Human-readable timestamp formatting
//!
//! Crop handles are labelled relative to the start of the recording, and
//! tools print absolute timestamps in UTC.

use chrono::{DateTime, SecondsFormat, Utc};

/// Relative times at or above this switch from `M:SS.mmm` to `H:MM:SS.mmm`
const HOUR_FORMAT_MIN_MS: i64 = 3_600_000;

/// Format `timestamp_ms` relative to `origin_ms`
///
/// - Below one hour: `M:SS.mmm`
/// - One hour or more: `H:MM:SS.mmm`
/// - Before the origin: leading `-`
///
/// # Examples
///
/// ```
/// use sj_common::human_time::format_relative_ms;
///
/// assert_eq!(format_relative_ms(1_500, 0), "0:01.500");
/// assert_eq!(format_relative_ms(1_000_065_250, 1_000_000_000), "1:05.250");
/// assert_eq!(format_relative_ms(3_723_004, 0), "1:02:03.004");
/// assert_eq!(format_relative_ms(0, 2_000), "-0:02.000");
/// ```
pub fn format_relative_ms(timestamp_ms: i64, origin_ms: i64) -> String {
    let offset = i128::from(timestamp_ms) - i128::from(origin_ms);
    format_signed_ms(offset)
}

/// Format a length in milliseconds using the same layout as [`format_relative_ms`]
///
/// ```
/// use sj_common::human_time::format_duration_ms;
///
/// assert_eq!(format_duration_ms(1_000), "0:01.000");
/// assert_eq!(format_duration_ms(7_200_000), "2:00:00.000");
/// ```
pub fn format_duration_ms(duration_ms: i64) -> String {
    format_signed_ms(i128::from(duration_ms))
}

/// Format an epoch-millisecond timestamp as UTC RFC 3339
///
/// ```
/// use sj_common::human_time::format_absolute_ms;
///
/// assert_eq!(format_absolute_ms(0), "1970-01-01T00:00:00.000Z");
/// assert_eq!(format_absolute_ms(1_600_000_000_123), "2020-09-13T12:26:40.123Z");
/// ```
pub fn format_absolute_ms(timestamp_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(timestamp_ms) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => "invalid timestamp".to_string(),
    }
}

// Offsets between two i64 timestamps can exceed i64, so work in i128
fn format_signed_ms(ms: i128) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let abs_ms = ms.unsigned_abs();

    let millis = abs_ms % 1000;
    let total_seconds = abs_ms / 1000;
    let secs = total_seconds % 60;

    if abs_ms < HOUR_FORMAT_MIN_MS as u128 {
        let minutes = total_seconds / 60;
        format!("{}{}:{:02}.{:03}", sign, minutes, secs, millis)
    } else {
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        format!("{}{}:{:02}:{:02}.{:03}", sign, hours, minutes, secs, millis)
    }
}

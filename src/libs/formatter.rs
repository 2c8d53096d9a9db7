//! Human-readable job duration formatting.
//!
//! Turns the two wall-clock strings recorded on a job ("time in" and "time
//! out", both "HH:MM" in 24-hour format) into the elapsed-time phrase shown on
//! summary cards and in text summaries, e.g. `"8 hours 30 minutes"`.
//!
//! ## Rules
//!
//! - Either side blank → `"N/A"`. A malformed time is treated the same way.
//! - Both times are placed on one reference date. When "time out" is earlier
//!   than "time in" the job ran overnight and "time out" moves forward by
//!   exactly one day. Longer spans are not representable.
//! - Hours and minutes are whole units, truncated.
//! - Each unit is singular only when its count is exactly 1; a zero unit is
//!   left out, and a zero span reads `"0 minutes"`.
//!
//! ## Examples
//!
//! ```rust
//! use tradelog::libs::formatter::format_duration;
//!
//! assert_eq!(format_duration("09:00", "17:30"), "8 hours 30 minutes");
//! assert_eq!(format_duration("22:00", "02:00"), "4 hours");
//! assert_eq!(format_duration("09:00", "09:00"), "0 minutes");
//! assert_eq!(format_duration("", "17:00"), "N/A");
//! ```

use chrono::{Duration, NaiveDate, NaiveTime};

/// Placeholder shown when a duration cannot be computed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Parses an "HH:MM" 24-hour time of day.
///
/// Surrounding whitespace is ignored. Returns `None` for blank or malformed
/// input, including out-of-range values such as `"24:00"` or `"12:60"`.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// Elapsed time between two "HH:MM" strings, with overnight rollover.
///
/// # Examples
///
/// ```rust
/// use tradelog::libs::formatter::format_duration;
///
/// assert_eq!(format_duration("09:00", "10:01"), "1 hour 1 minute");
/// assert_eq!(format_duration("09:00", "11:02"), "2 hours 2 minutes");
/// ```
pub fn format_duration(time_in: &str, time_out: &str) -> String {
    match elapsed_between(time_in, time_out) {
        Some(elapsed) => format_elapsed(&elapsed),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Elapsed time between two "HH:MM" strings, or `None` if either is unusable.
pub fn elapsed_between(time_in: &str, time_out: &str) -> Option<Duration> {
    let start = parse_time_of_day(time_in)?;
    let end = parse_time_of_day(time_out)?;

    // Any fixed date works; only the difference matters.
    let reference = NaiveDate::from_ymd_opt(2000, 1, 1)?;
    let start = reference.and_time(start);
    let mut end = reference.and_time(end);

    if end < start {
        end += Duration::days(1);
    }

    Some(end - start)
}

/// Renders a duration as `"<N> hour[s] <M> minute[s]"`.
///
/// Seconds are dropped. Negative durations render as `"0 minutes"`.
pub fn format_elapsed(duration: &Duration) -> String {
    let total_minutes = duration.num_minutes().max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    let mut parts = Vec::with_capacity(2);
    if hours > 0 {
        parts.push(pluralize(hours, "hour"));
    }
    if minutes > 0 {
        parts.push(pluralize(minutes, "minute"));
    }

    if parts.is_empty() {
        "0 minutes".to_string()
    } else {
        parts.join(" ")
    }
}

fn pluralize(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

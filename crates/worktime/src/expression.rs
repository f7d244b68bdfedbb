//! Work-time expression parsing and rendering.
//!
//! Converts between human-entered work-time notations and normalized second
//! counts, in both directions. Two textual forms are understood:
//!
//! - a duration, `"1h15m"` (either unit optional, at least one present)
//! - a clock interval, `"11:00-13:00"` (lenient time-of-day on both sides)
//!
//! All parsing is anchored to an explicitly supplied reference moment — the
//! caller provides "now" — so interval arithmetic is deterministic and
//! reproduces real wall-clock behavior on DST transition days. An interval
//! whose end is not strictly after its start wraps through midnight.
//!
//! Failure is always signalled by `None`; no operation here panics or
//! returns an error value.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::Serialize;

use crate::timeofday::{parse_hms_strict, parse_time_of_day};

/// Seconds added when an interval wraps through midnight.
const DAY_IN_SECONDS: i64 = 86_400;

// ── Result types ────────────────────────────────────────────────────────────

/// A parsed work-time expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Normalized length in seconds, always non-negative.
    pub seconds: i64,
    /// Start of the interval as `"HH:MM:SS"`; `None` for bare durations.
    pub start_time: Option<String>,
}

/// A duration rendered as a clock interval, both endpoints as `"HH:MM"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub start_time: String,
    pub end_time: String,
}

// ── parse ───────────────────────────────────────────────────────────────────

/// Parse a work-time expression into seconds.
///
/// Tries the duration grammar first (`"1h15m"`, `"45m"`, `"2h"`), then the
/// interval grammar (`"11:00-13:00"`, `"23:50-00:10"`, `"9-17"`). Returns
/// `None` if the input matches neither.
///
/// Interval endpoints are resolved on `reference`'s calendar day (see
/// [`parse_time_of_day`]); when the end is not strictly after the start the
/// interval wraps through midnight. The elapsed count is the true wall-clock
/// difference between the resolved instants, so intervals spanning a DST
/// transition come out shorter or longer than their naive width.
///
/// # Examples
///
/// ```
/// use chrono::TimeZone;
/// use worktime::parse;
///
/// let anchor = chrono_tz::Europe::Berlin
///     .with_ymd_and_hms(2024, 1, 10, 12, 0, 0)
///     .unwrap();
///
/// let duration = parse("1h15m", &anchor).unwrap();
/// assert_eq!(duration.seconds, 4500);
/// assert_eq!(duration.start_time, None);
///
/// let interval = parse("23:50-00:10", &anchor).unwrap();
/// assert_eq!(interval.seconds, 1200);
/// assert_eq!(interval.start_time.as_deref(), Some("23:50:00"));
///
/// assert_eq!(parse("5", &anchor), None);
/// ```
pub fn parse(input: &str, reference: &DateTime<Tz>) -> Option<ParseResult> {
    parse_duration_expr(input)
        .map(|seconds| ParseResult {
            seconds,
            start_time: None,
        })
        .or_else(|| parse_interval_expr(input, reference))
}

/// Parse the anchored duration grammar: `(<digits>h)?(<digits>m)?` with at
/// least one group present, case-insensitive units, hours strictly before
/// minutes, no other characters anywhere.
fn parse_duration_expr(input: &str) -> Option<i64> {
    let bytes = input.as_bytes();
    let first_end = digit_run_end(bytes, 0);
    if first_end == 0 {
        return None;
    }

    let (hour_digits, minute_digits) = match bytes.get(first_end) {
        Some(b'h' | b'H') => {
            let rest = first_end + 1;
            if rest == bytes.len() {
                (Some(&input[..first_end]), None)
            } else {
                let minute_end = digit_run_end(bytes, rest);
                if minute_end == rest || minute_end + 1 != bytes.len() {
                    return None;
                }
                match bytes[minute_end] {
                    b'm' | b'M' => (Some(&input[..first_end]), Some(&input[rest..minute_end])),
                    _ => return None,
                }
            }
        }
        Some(b'm' | b'M') if first_end + 1 == bytes.len() => (None, Some(&input[..first_end])),
        _ => return None,
    };

    let hours: i64 = match hour_digits {
        Some(digits) => digits.parse().ok()?,
        None => 0,
    };
    let minutes: i64 = match minute_digits {
        Some(digits) => digits.parse().ok()?,
        None => 0,
    };
    hours.checked_mul(3600)?.checked_add(minutes.checked_mul(60)?)
}

/// End of the run of ASCII digits starting at `start`.
fn digit_run_end(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    end
}

/// Parse the interval grammar: exactly one `-` with a time-of-day on each
/// side.
fn parse_interval_expr(input: &str, reference: &DateTime<Tz>) -> Option<ParseResult> {
    let (from, to) = input.split_once('-')?;
    if to.contains('-') {
        return None;
    }

    let start = parse_time_of_day(from, reference)?;
    let end = parse_time_of_day(to, reference)?;

    let elapsed = end.signed_duration_since(start).num_seconds();
    let seconds = if end > start {
        elapsed
    } else {
        // End at or before start: the interval crosses midnight.
        DAY_IN_SECONDS + elapsed
    };

    Some(ParseResult {
        seconds,
        start_time: Some(start.format("%H:%M:%S").to_string()),
    })
}

// ── to_duration ─────────────────────────────────────────────────────────────

/// Render a second count as a duration string (`"1h15m"`, `"20m"`, `"-2h"`).
///
/// Whole hours and minutes only; a sub-minute remainder is truncated away,
/// so anything in `-59..=59` renders as `"0h"`. Negative counts carry a
/// leading `-`.
pub fn to_duration(seconds: i64) -> String {
    format_duration(seconds, false)
}

/// Like [`to_duration`], but positive counts carry a leading `+`.
///
/// Used when rendering a balance where the sign is the message (`"+1h15m"`
/// overtime vs `"-30m"` deficit). Zero still renders as plain `"0h"`.
pub fn to_duration_signed(seconds: i64) -> String {
    format_duration(seconds, true)
}

fn format_duration(seconds: i64, plus_prefix: bool) -> String {
    let hours = seconds.unsigned_abs() / 3600;
    let minutes = (seconds.unsigned_abs() % 3600) / 60;

    if hours == 0 && minutes == 0 {
        return "0h".to_string();
    }

    let mut rendered = String::new();
    if seconds < 0 {
        rendered.push('-');
    }
    if seconds > 0 && plus_prefix {
        rendered.push('+');
    }
    if hours > 0 {
        rendered.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        rendered.push_str(&format!("{minutes}m"));
    }
    rendered
}

// ── to_interval ─────────────────────────────────────────────────────────────

/// Render a second count as a clock interval anchored at `start_time`.
///
/// `start_time` must be an exact `"HH:MM:SS"` string; it is resolved on
/// `reference`'s calendar day and the end is computed by true instant
/// arithmetic, wrapping through midnight when needed. Both endpoints are
/// rendered at minute precision.
///
/// Returns `None` for a negative `seconds` or an unparseable `start_time`.
pub fn to_interval(seconds: i64, start_time: &str, reference: &DateTime<Tz>) -> Option<Interval> {
    if seconds < 0 {
        return None;
    }
    let start = parse_hms_strict(start_time, reference)?;
    let end = start + Duration::seconds(seconds);

    Some(Interval {
        start_time: start.format("%H:%M").to_string(),
        end_time: end.format("%H:%M").to_string(),
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────

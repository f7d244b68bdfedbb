//! Lenient time-of-day parsing anchored to a reference day.
//!
//! Work-time intervals are entered as bare wall-clock times ("11", "9.15",
//! "13:00") with no date attached. Each accepted notation is resolved against
//! the calendar day of an explicitly supplied reference moment — no system
//! clock access here — so the same input is reproducible in tests, including
//! on DST transition days where a wall-clock time may not exist or may occur
//! twice.

use chrono::{DateTime, Duration, LocalResult, NaiveTime, TimeZone};
use chrono_tz::Tz;

// ── Accepted notations ──────────────────────────────────────────────────────

/// Hour field width accepted by a time-of-day notation.
#[derive(Debug, Clone, Copy)]
enum HourWidth {
    /// Exactly two digits ("09", "13").
    Two,
    /// One or two digits ("9", "13").
    OneOrTwo,
}

/// One accepted time-of-day notation: an hour field, optionally followed by
/// a separator and a two-digit minute field.
#[derive(Debug, Clone, Copy)]
struct TimeOfDayFormat {
    hour: HourWidth,
    separator: Option<char>,
}

/// The accepted notations, tried in order; the first syntactic and semantic
/// match wins. The order is part of the contract — keep it auditable here
/// rather than buried in conditionals.
const TIME_OF_DAY_FORMATS: [TimeOfDayFormat; 6] = [
    // "HH" — "09", "13"
    TimeOfDayFormat {
        hour: HourWidth::Two,
        separator: None,
    },
    // "HH:mm" — "09:30"
    TimeOfDayFormat {
        hour: HourWidth::Two,
        separator: Some(':'),
    },
    // "H:mm" — "9:30"
    TimeOfDayFormat {
        hour: HourWidth::OneOrTwo,
        separator: Some(':'),
    },
    // "HH.mm" — "09.30"
    TimeOfDayFormat {
        hour: HourWidth::Two,
        separator: Some('.'),
    },
    // "H.mm" — "9.30"
    TimeOfDayFormat {
        hour: HourWidth::OneOrTwo,
        separator: Some('.'),
    },
    // "H" — "9"
    TimeOfDayFormat {
        hour: HourWidth::OneOrTwo,
        separator: None,
    },
];

// ── Parsing ─────────────────────────────────────────────────────────────────

/// Parse a lenient time-of-day string against a reference moment.
///
/// Accepts six anchored notations, in priority order: `HH`, `HH:mm`, `H:mm`,
/// `HH.mm`, `H.mm`, `H`. Hours must be 0–23 and minutes 0–59; anything with
/// leading or trailing garbage, a wrong-width field, or an out-of-range value
/// is rejected.
///
/// The result is the wall-clock time placed on the calendar day of
/// `reference`, in `reference`'s timezone. On a DST transition day an
/// ambiguous wall time resolves to its earliest occurrence and a nonexistent
/// one shifts forward past the gap.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Timelike};
/// use worktime::parse_time_of_day;
///
/// let anchor = chrono_tz::Europe::Berlin
///     .with_ymd_and_hms(2024, 1, 10, 12, 0, 0)
///     .unwrap();
/// let resolved = parse_time_of_day("9.15", &anchor).unwrap();
/// assert_eq!((resolved.hour(), resolved.minute()), (9, 15));
/// assert!(parse_time_of_day("35", &anchor).is_none());
/// ```
pub fn parse_time_of_day(text: &str, reference: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    TIME_OF_DAY_FORMATS
        .iter()
        .find_map(|format| match_time_of_day(text, format))
        .and_then(|time| resolve_on_reference_day(time, reference))
}

/// Match `text` against a single notation. Fully anchored: the whole input
/// must be consumed.
fn match_time_of_day(text: &str, format: &TimeOfDayFormat) -> Option<NaiveTime> {
    let (hour_text, minute) = match format.separator {
        Some(separator) => {
            let (hour_text, minute_text) = text.split_once(separator)?;
            (hour_text, parse_two_digit_field(minute_text)?)
        }
        None => (text, 0),
    };

    let width_ok = match format.hour {
        HourWidth::Two => hour_text.len() == 2,
        HourWidth::OneOrTwo => hour_text.len() == 1 || hour_text.len() == 2,
    };
    if !width_ok || !hour_text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = hour_text.parse().ok()?;

    // Range validation: 24:00 or :60 are rejected here.
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Parse a field of exactly two ASCII digits.
fn parse_two_digit_field(text: &str) -> Option<u32> {
    if text.len() != 2 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Parse an exact `HH:MM:SS` string (two digits per field, `:` separators).
///
/// This is the strict companion of [`parse_time_of_day`], used for start
/// times that were produced by this crate's own formatting rather than typed
/// by a person.
pub(crate) fn parse_hms_strict(text: &str, reference: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let bytes = text.as_bytes();
    if bytes.len() != 8 || bytes[2] != b':' || bytes[5] != b':' {
        return None;
    }
    let hour = parse_two_digit_field(&text[0..2])?;
    let minute = parse_two_digit_field(&text[3..5])?;
    let second = parse_two_digit_field(&text[6..8])?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;
    resolve_on_reference_day(time, reference)
}

// ── Reference-day resolution ────────────────────────────────────────────────

/// Place a wall-clock time on the reference moment's calendar day.
///
/// An ambiguous local time (fall-back day) resolves to its earliest
/// occurrence. A nonexistent local time (spring-forward gap) shifts forward
/// in one-hour steps until it lands on a wall time that exists.
fn resolve_on_reference_day(time: NaiveTime, reference: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let tz = reference.timezone();
    let naive = reference.date_naive().and_time(time);

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(resolved) => Some(resolved),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => (1..=3).find_map(|hours| {
            tz.from_local_datetime(&(naive + Duration::hours(hours)))
                .earliest()
        }),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Offset, Timelike};

    fn berlin_noon(year: i32, month: u32, day: u32) -> DateTime<Tz> {
        chrono_tz::Europe::Berlin
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .unwrap()
    }

    fn plain_day() -> DateTime<Tz> {
        berlin_noon(2020, 1, 1)
    }

    // ── Lenient grammar ─────────────────────────────────────────────────

    #[test]
    fn test_accepts_all_six_notations() {
        let cases = [
            ("11", (11, 0)),
            ("09", (9, 0)),
            ("9", (9, 0)),
            ("11:30", (11, 30)),
            ("9:05", (9, 5)),
            ("11.30", (11, 30)),
            ("9.05", (9, 5)),
            ("0", (0, 0)),
            ("00", (0, 0)),
            ("23:59", (23, 59)),
        ];
        for (input, (hour, minute)) in cases {
            let resolved = parse_time_of_day(input, &plain_day())
                .unwrap_or_else(|| panic!("'{input}' should parse"));
            assert_eq!((resolved.hour(), resolved.minute()), (hour, minute), "{input}");
        }
    }

    #[test]
    fn test_rejects_malformed_or_out_of_range() {
        let cases = [
            "", " ", "foo", "1130", "115", "24", "35", "35:00", "22:60", "11:5",
            "11:555", "11:", ":30", "11,30", "11:00:00", " 11", "11 ", "-1", "9.5",
        ];
        for input in cases {
            assert!(
                parse_time_of_day(input, &plain_day()).is_none(),
                "'{input}' should be rejected"
            );
        }
    }

    #[test]
    fn test_resolves_on_reference_calendar_day() {
        let resolved = parse_time_of_day("13:45", &plain_day()).unwrap();
        assert_eq!(resolved.date_naive(), plain_day().date_naive());
        assert_eq!((resolved.hour(), resolved.minute(), resolved.second()), (13, 45, 0));
    }

    // ── DST transition days ─────────────────────────────────────────────

    #[test]
    fn test_spring_forward_gap_shifts_forward() {
        // Berlin 2020-03-29: 02:00 → 03:00, so 2:30 does not exist.
        let resolved = parse_time_of_day("2:30", &berlin_noon(2020, 3, 29)).unwrap();
        assert_eq!((resolved.hour(), resolved.minute()), (3, 30));
    }

    #[test]
    fn test_fall_back_ambiguity_takes_earliest() {
        // Berlin 2020-10-25: 03:00 → 02:00, so 2:00 occurs twice. The first
        // occurrence is still on summer time (UTC+2).
        let resolved = parse_time_of_day("2:00", &berlin_noon(2020, 10, 25)).unwrap();
        assert_eq!(resolved.offset().fix().local_minus_utc(), 7200);
    }

    // ── Strict HH:MM:SS ─────────────────────────────────────────────────

    #[test]
    fn test_strict_hms_accepts_exact_form_only() {
        let reference = plain_day();
        let resolved = parse_hms_strict("09:30:15", &reference).unwrap();
        assert_eq!(
            (resolved.hour(), resolved.minute(), resolved.second()),
            (9, 30, 15)
        );

        for input in ["9:30:15", "09:30", "09.30.15", "09:30:60", "25:00:00", "foo", ""] {
            assert!(
                parse_hms_strict(input, &reference).is_none(),
                "'{input}' should be rejected"
            );
        }
    }
}

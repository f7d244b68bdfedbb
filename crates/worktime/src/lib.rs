//! # worktime
//!
//! Deterministic work-time notation parsing.
//!
//! Converts human-entered work-time notations — durations like `"1h15m"` and
//! clock intervals like `"11:00-13:00"` — into normalized second counts, and
//! renders second counts back as either form. Interval arithmetic handles
//! overnight wraparound and resolves bare clock times on a caller-supplied
//! reference day, so behavior on DST transition days matches the real local
//! clock instead of a fixed 24-hour assumption.
//!
//! No function in this crate reads the system clock; the caller provides the
//! "now" anchor, keeping every operation pure and testable. Unparseable
//! input is reported as `None`, never as a panic or an error value.
//!
//! ## Modules
//!
//! - [`expression`] — duration/interval parsing and rendering
//! - [`timeofday`] — lenient time-of-day parsing anchored to a reference day

pub mod expression;
pub mod timeofday;

pub use expression::{parse, to_duration, to_duration_signed, to_interval, Interval, ParseResult};
pub use timeofday::parse_time_of_day;

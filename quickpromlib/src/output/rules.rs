//! Adaptive formatting rules.
//!
//! Pure functions picking how numbers and timestamps are printed for a whole
//! result at once, so every cell of a table shares one format:
//!
//! - **Numbers**: fixed-point unless the magnitudes are very small or very
//!   large, with only as many fractional digits as the data actually has
//!   (capped at [`MAX_FRACTION_DIGITS`]).
//! - **Timestamps**: date, seconds and milliseconds are dropped from each row
//!   when they carry no information across the displayed set.

use chrono::{DateTime, FixedOffset, TimeZone, Timelike};

use crate::data::model::signed_exponent;
use crate::data::value_info::Magnitude;

/// Upper bound on printed fractional digits.
pub const MAX_FRACTION_DIGITS: usize = 6;

/// Date printed once above rows that share it.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Full instant with offset, for single evaluation timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f %:z";

/// Exponent bounds outside of which scientific notation is used.
///
/// Scientific notation is chosen when the smallest exponent is `<= low` or
/// the largest is `>= high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScientificThresholds {
    pub low: i32,
    pub high: i32,
}

impl Default for ScientificThresholds {
    fn default() -> Self {
        Self { low: -4, high: 6 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    Fixed,
    Scientific,
}

/// A numeric print format: notation plus fractional digit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatFormat {
    pub notation: Notation,
    pub precision: usize,
}

impl FloatFormat {
    /// Best format for a result's magnitude, with the default thresholds.
    pub fn best(magnitude: &Magnitude) -> Self {
        Self::best_with(magnitude, ScientificThresholds::default())
    }

    pub fn best_with(magnitude: &Magnitude, thresholds: ScientificThresholds) -> Self {
        let precision = magnitude.max_fraction_digits.min(MAX_FRACTION_DIGITS);
        let notation = if magnitude.min_exponent <= thresholds.low
            || magnitude.max_exponent >= thresholds.high
        {
            Notation::Scientific
        } else {
            Notation::Fixed
        };

        Self {
            notation,
            precision,
        }
    }

    /// Print `value`. NaN and infinities use Rust's default spelling.
    pub fn format(&self, value: f64) -> String {
        match self.notation {
            Notation::Fixed => format!("{:.*}", self.precision, value),
            Notation::Scientific => format_scientific(value, self.precision),
        }
    }
}

/// `1.50e+06` style: signed exponent with at least two digits.
fn format_scientific(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*e}", precision, value);
    if value.is_finite() {
        signed_exponent(&formatted)
    } else {
        formatted
    }
}

/// Which parts of a set of timestamps are identical or zero throughout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateParts {
    /// Every timestamp falls on the same calendar date
    pub date: bool,
    /// Every timestamp has zero seconds and zero sub-seconds
    pub zero_second: bool,
    /// Every timestamp has zero sub-seconds
    pub zero_millisecond: bool,
}

/// Compute [`DateParts`] for `times`, in their own time zone.
///
/// Fewer than two timestamps share nothing: there is nothing to elide.
pub fn shared_date_parts<Tz: TimeZone>(times: &[DateTime<Tz>]) -> DateParts {
    let Some(first) = times.first() else {
        return DateParts::default();
    };
    if times.len() == 1 {
        return DateParts::default();
    }

    let first_date = first.date_naive();
    let zero_millisecond = times.iter().all(|t| t.timestamp_subsec_nanos() == 0);

    DateParts {
        date: times.iter().all(|t| t.date_naive() == first_date),
        zero_second: zero_millisecond && times.iter().all(|t| t.second() == 0),
        zero_millisecond,
    }
}

/// Per-row timestamp format chosen from [`DateParts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFormat {
    /// The date is shared and printed once as a header
    pub date_header: bool,
    /// strftime pattern for each row
    pub row: &'static str,
}

impl TimeFormat {
    pub fn for_parts(parts: DateParts) -> Self {
        let row = match (parts.date, parts.zero_second, parts.zero_millisecond) {
            (true, true, _) => "%H:%M",
            (true, false, true) => "%H:%M:%S",
            (true, false, false) => "%H:%M:%S%.3f",
            (false, true, _) => "%Y-%m-%d %H:%M",
            (false, false, true) => "%Y-%m-%d %H:%M:%S",
            (false, false, false) => "%Y-%m-%d %H:%M:%S%.3f",
        };

        Self {
            date_header: parts.date,
            row,
        }
    }

    pub fn for_times<Tz: TimeZone>(times: &[DateTime<Tz>]) -> Self {
        Self::for_parts(shared_date_parts(times))
    }

    pub fn format(&self, time: &DateTime<FixedOffset>) -> String {
        time.format(self.row).to_string()
    }
}

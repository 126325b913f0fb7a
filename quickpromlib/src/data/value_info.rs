//! Label and magnitude analysis of a query result.
//!
//! A single pass over every sample (or series) collects:
//!
//! - **Label statistics**: for each label name, the distinct values seen and
//!   how many items carry it. This decides which labels are *common* (hoisted
//!   out of the table) and which are *varying* (one column each).
//! - **Magnitude statistics**: the smallest and largest base-10 exponent of
//!   any nonzero value, and the longest fractional part in the shortest
//!   decimal form of any value. These drive the numeric print format.
//! - **Seen times**: the timestamps that will be displayed.
//!
//! The scan is a fold over owned state; the resulting [`ValueInfo`] is
//! immutable and shares nothing with the input.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::model::{LabelSet, Sample, SamplePair, Series};
use super::time_axis::TimeAxis;

/// What was seen for one label name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelInfo {
    /// Distinct values seen
    pub values: BTreeSet<String>,
    /// Number of items carrying the label at all
    pub occurrences: usize,
}

/// Order-of-magnitude statistics over a result's values.
///
/// With no nonzero value both exponents are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Magnitude {
    pub min_exponent: i32,
    pub max_exponent: i32,
    pub max_fraction_digits: usize,
}

/// Immutable analysis of a result's labels, values and times.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueInfo {
    labels: BTreeMap<String, LabelInfo>,
    length: usize,
    magnitude: Magnitude,
    seen_times: TimeAxis,
}

impl ValueInfo {
    /// Analyze items given as (label set, values) pairs.
    ///
    /// `seen_times` is stored as-is; callers decide which timestamps count as
    /// displayed (the first sample's for instant vectors, all of them for
    /// ranges).
    pub fn analyze<'a, I, V>(items: I, seen_times: TimeAxis) -> Self
    where
        I: IntoIterator<Item = (&'a LabelSet, V)>,
        V: IntoIterator<Item = f64>,
    {
        let scan = items
            .into_iter()
            .fold(Scan::default(), |scan, (labels, values)| {
                values
                    .into_iter()
                    .fold(scan.with_labels(labels), Scan::with_value)
            });

        let info = scan.finish(seen_times);
        debug!(
            length = info.length,
            labels = info.labels.len(),
            min_exponent = info.magnitude.min_exponent,
            max_exponent = info.magnitude.max_exponent,
            max_fraction_digits = info.magnitude.max_fraction_digits,
            "analyzed result"
        );
        info
    }

    pub fn from_scalar(pair: &SamplePair) -> Self {
        let no_labels = LabelSet::new();
        Self::analyze(
            [(&no_labels, [pair.value])],
            TimeAxis::from_timestamps([pair.timestamp]),
        )
    }

    pub fn from_vector(samples: &[Sample]) -> Self {
        let seen = TimeAxis::from_timestamps(samples.first().map(|s| s.point.timestamp));
        Self::analyze(
            samples.iter().map(|s| (&s.metric, [s.point.value])),
            seen,
        )
    }

    pub fn from_matrix(series: &[Series]) -> Self {
        Self::analyze(
            series
                .iter()
                .map(|s| (&s.metric, s.values.iter().map(|p| p.value))),
            TimeAxis::from_series(series),
        )
    }

    /// Number of samples or series scanned.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn label_info(&self, name: &str) -> Option<&LabelInfo> {
        self.labels.get(name)
    }

    pub fn magnitude(&self) -> Magnitude {
        self.magnitude
    }

    pub fn seen_times(&self) -> &TimeAxis {
        &self.seen_times
    }

    /// Labels carried with one identical value by every item.
    ///
    /// Always empty for fewer than two items: a lone item cannot show that a
    /// label is invariant.
    pub fn common_labels(&self) -> BTreeMap<String, String> {
        self.labels
            .iter()
            .filter(|(_, info)| self.is_common(info))
            .filter_map(|(name, info)| {
                info.values
                    .first()
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect()
    }

    /// Every label that is not common, sorted by name.
    pub fn varying_labels(&self) -> Vec<String> {
        // BTreeMap iteration is already sorted by name
        self.labels
            .iter()
            .filter(|(_, info)| !self.is_common(info))
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn is_common(&self, info: &LabelInfo) -> bool {
        self.length > 1 && info.values.len() == 1 && info.occurrences == self.length
    }
}

/// Number of digits after the decimal point in the shortest decimal form of
/// `value`.
///
/// The shortest form switches to exponent notation outside `[1e-4, 1e6)`,
/// in which case the mantissa's fraction is counted: `0.00000015` is
/// `1.5e-7` and has one fractional digit.
pub fn fraction_digits(value: f64) -> usize {
    let abs = value.abs();
    let scientific = format!("{abs:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let shortest = if !(-4..6).contains(&exponent) {
        mantissa.to_string()
    } else {
        abs.to_string()
    };

    shortest
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len())
}

/// Running state of the analysis fold.
#[derive(Default)]
struct Scan {
    labels: BTreeMap<String, LabelInfo>,
    length: usize,
    exponents: Option<(i32, i32)>,
    max_fraction_digits: usize,
}

impl Scan {
    fn with_labels(mut self, labels: &LabelSet) -> Self {
        for (name, value) in labels {
            let info = self.labels.entry(name.clone()).or_default();
            info.occurrences += 1;
            info.values.insert(value.clone());
        }
        self.length += 1;
        self
    }

    fn with_value(mut self, value: f64) -> Self {
        // Zero has no order of magnitude; NaN and infinities have none either
        if value == 0.0 || !value.is_finite() {
            return self;
        }

        let exponent = value.abs().log10().floor() as i32;
        self.exponents = Some(match self.exponents {
            Some((min, max)) => (min.min(exponent), max.max(exponent)),
            None => (exponent, exponent),
        });
        self.max_fraction_digits = self.max_fraction_digits.max(fraction_digits(value));
        self
    }

    fn finish(self, seen_times: TimeAxis) -> ValueInfo {
        let (min_exponent, max_exponent) = self.exponents.unwrap_or((0, 0));
        ValueInfo {
            labels: self.labels,
            length: self.length,
            magnitude: Magnitude {
                min_exponent,
                max_exponent,
                max_fraction_digits: self.max_fraction_digits,
            },
            seen_times,
        }
    }
}

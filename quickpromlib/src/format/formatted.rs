//! Presentation model of a query result.
//!
//! The data flow is:
//! 1. Raw result (`RawResult`)
//! 2. Analysis (`ValueInfo`)
//! 3. Formatted result (common labels hoisted, varying labels projected into
//!    positional tuples, timestamps as absolute instants)
//!
//! A formatted result is built once per response and handed to the renderer.
//! Range series keep their own point order; alignment onto the shared time
//! axis happens in [`collate`](super::collate) only when a table is drawn.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::data::model::{LabelSet, RawResult, ResultType, Sample, SamplePair, Series};
use crate::data::value_info::{Magnitude, ValueInfo};

/// Fields shared by every formatted result kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormattedValue {
    /// True iff the raw result carried no samples; all other fields are then
    /// left at their defaults
    pub empty: bool,
    pub magnitude: Magnitude,
    /// Labels identical across every item, printed once
    pub common_labels: BTreeMap<String, String>,
    /// Names of the remaining labels, sorted; one column each
    pub varying_labels: Vec<String>,
}

impl FormattedValue {
    fn empty() -> Self {
        Self {
            empty: true,
            ..Self::default()
        }
    }

    fn from_info(info: &ValueInfo) -> Self {
        Self {
            empty: false,
            magnitude: info.magnitude(),
            common_labels: info.common_labels(),
            varying_labels: info.varying_labels(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormattedSamplePair {
    pub time: DateTime<Utc>,
    pub value: f64,
}

impl From<&SamplePair> for FormattedSamplePair {
    fn from(pair: &SamplePair) -> Self {
        Self {
            time: pair.timestamp.to_datetime(),
            value: pair.value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormattedScalar {
    pub info: FormattedValue,
    pub point: Option<FormattedSamplePair>,
}

/// One instant-vector row: varying label values in column order, then the value.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedSample {
    pub label_values: Vec<String>,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormattedInstantVector {
    pub info: FormattedValue,
    /// Evaluation instant, taken from the first sample
    pub time: Option<DateTime<Utc>>,
    pub samples: Vec<FormattedSample>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormattedSeries {
    pub label_values: Vec<String>,
    pub values: Vec<FormattedSamplePair>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormattedRangeVector {
    pub info: FormattedValue,
    pub min_time: Option<DateTime<Utc>>,
    pub max_time: Option<DateTime<Utc>>,
    /// Every distinct timestamp across all series, ascending
    pub seen_times: Vec<DateTime<Utc>>,
    pub series: Vec<FormattedSeries>,
}

/// A formatted result of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FormattedResult {
    Scalar(FormattedScalar),
    InstantVector(FormattedInstantVector),
    RangeVector(FormattedRangeVector),
}

impl FormattedResult {
    pub fn result_type(&self) -> ResultType {
        match self {
            FormattedResult::Scalar(_) => ResultType::Scalar,
            FormattedResult::InstantVector(_) => ResultType::Vector,
            FormattedResult::RangeVector(_) => ResultType::Matrix,
        }
    }

    pub fn info(&self) -> &FormattedValue {
        match self {
            FormattedResult::Scalar(s) => &s.info,
            FormattedResult::InstantVector(v) => &v.info,
            FormattedResult::RangeVector(m) => &m.info,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.info().empty
    }
}

/// Format any raw result.
pub fn format_value(raw: &RawResult) -> FormattedResult {
    match raw {
        RawResult::Scalar(pair) => FormattedResult::Scalar(format_scalar(pair.as_ref())),
        RawResult::Vector(samples) => {
            FormattedResult::InstantVector(format_instant_vector(samples))
        }
        RawResult::Matrix(series) => FormattedResult::RangeVector(format_range_vector(series)),
    }
}

pub fn format_scalar(scalar: Option<&SamplePair>) -> FormattedScalar {
    let Some(pair) = scalar else {
        return FormattedScalar {
            info: FormattedValue::empty(),
            point: None,
        };
    };

    let info = ValueInfo::from_scalar(pair);
    FormattedScalar {
        info: FormattedValue::from_info(&info),
        point: Some(pair.into()),
    }
}

pub fn format_instant_vector(samples: &[Sample]) -> FormattedInstantVector {
    if samples.is_empty() {
        return FormattedInstantVector {
            info: FormattedValue::empty(),
            ..FormattedInstantVector::default()
        };
    }

    let info = FormattedValue::from_info(&ValueInfo::from_vector(samples));
    let time = samples.first().map(|s| s.point.timestamp.to_datetime());
    let samples = samples
        .iter()
        .map(|s| FormattedSample {
            label_values: project_labels(&info.varying_labels, &s.metric),
            value: s.point.value,
        })
        .collect();

    FormattedInstantVector {
        info,
        time,
        samples,
    }
}

pub fn format_range_vector(series: &[Series]) -> FormattedRangeVector {
    if series.is_empty() {
        return FormattedRangeVector {
            info: FormattedValue::empty(),
            ..FormattedRangeVector::default()
        };
    }

    let analysis = ValueInfo::from_matrix(series);
    let axis = analysis.seen_times();
    let info = FormattedValue::from_info(&analysis);

    let formatted: Vec<FormattedSeries> = series
        .iter()
        .map(|s| FormattedSeries {
            label_values: project_labels(&info.varying_labels, &s.metric),
            values: s.values.iter().map(FormattedSamplePair::from).collect(),
        })
        .collect();

    debug!(
        series = formatted.len(),
        axis = axis.len(),
        varying_labels = info.varying_labels.len(),
        "formatted range vector"
    );

    FormattedRangeVector {
        min_time: axis.min().map(|t| t.to_datetime()),
        max_time: axis.max().map(|t| t.to_datetime()),
        seen_times: axis.datetimes(),
        series: formatted,
        info,
    }
}

/// Values of `names` in `metric`, in order; absent labels become "".
fn project_labels(names: &[String], metric: &LabelSet) -> Vec<String> {
    names
        .iter()
        .map(|name| metric.get(name).cloned().unwrap_or_default())
        .collect()
}

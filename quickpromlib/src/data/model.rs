//! Raw query results as the backend returns them.
//!
//! These types mirror the Prometheus HTTP API result encoding: a sample pair
//! is `[<unix seconds>, "<value>"]`, vectors carry one pair per sample and
//! matrices carry a list of pairs per series. They are read-only inputs to
//! the rest of the pipeline.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::error::QuickpromError;

/// Label name to label value. Ordered so iteration and JSON output are stable.
pub type LabelSet = BTreeMap<String, String>;

/// Millisecond-resolution instant, relative to the unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Convert from the fractional unix seconds used on the wire.
    pub fn from_seconds(seconds: f64) -> Self {
        Self((seconds * 1000.0).round() as i64)
    }

    pub fn as_seconds(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Absolute instant in UTC, or `None` outside chrono's range.
    pub fn checked_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// Absolute instant in UTC. Out-of-range values collapse to the epoch.
    ///
    /// Decoded timestamps are always in range; only hand-built ones can hit
    /// the fallback.
    pub fn to_datetime(self) -> DateTime<Utc> {
        self.checked_datetime().unwrap_or_else(|| {
            warn!(millis = self.0, "timestamp out of range, shown as the epoch");
            DateTime::default()
        })
    }
}

/// Whole seconds are written as integers, anything else as the shortest
/// decimal with millisecond precision.
impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 1000 == 0 {
            serializer.serialize_i64(self.0 / 1000)
        } else {
            serializer.serialize_f64(self.as_seconds())
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let seconds = f64::deserialize(deserializer)?;
        let timestamp = Self::from_seconds(seconds);
        if !seconds.is_finite() || timestamp.checked_datetime().is_none() {
            return Err(D::Error::custom(format!("timestamp {seconds} is out of range")));
        }
        Ok(timestamp)
    }
}

/// Render a sample value the way the backend encodes it.
///
/// Plain shortest decimal, except magnitudes below `1e-6` or from `1e21` up,
/// which use the shortest exponent form (`1e-07`, `1.5e+21`).
pub fn format_sample_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    } else if value == f64::INFINITY {
        return "+Inf".to_string();
    } else if value == f64::NEG_INFINITY {
        return "-Inf".to_string();
    }

    let abs = value.abs();
    if abs != 0.0 && !(1e-6..1e21).contains(&abs) {
        signed_exponent(&format!("{value:e}"))
    } else {
        value.to_string()
    }
}

/// Rewrite Rust's `1.5e6` exponent form as `1.5e+06`: explicit sign and at
/// least two exponent digits.
pub(crate) fn signed_exponent(scientific: &str) -> String {
    match scientific.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => {
                let sign = if exponent < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", exponent.abs())
            }
            Err(_) => scientific.to_string(),
        },
        None => scientific.to_string(),
    }
}

/// Parse a backend-encoded sample value.
pub fn parse_sample_value(raw: &str) -> Option<f64> {
    match raw {
        "NaN" => Some(f64::NAN),
        "+Inf" | "Inf" => Some(f64::INFINITY),
        "-Inf" => Some(f64::NEG_INFINITY),
        _ => raw.parse().ok(),
    }
}

/// One (timestamp, value) point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePair {
    pub timestamp: Timestamp,
    pub value: f64,
}

impl SamplePair {
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Self { timestamp, value }
    }
}

impl Serialize for SamplePair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.timestamp, format_sample_value(self.value)).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SamplePair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (timestamp, raw): (Timestamp, String) = Deserialize::deserialize(deserializer)?;
        let value = parse_sample_value(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid sample value '{raw}'")))?;
        Ok(Self { timestamp, value })
    }
}

/// One labeled observation of an instant vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(default)]
    pub metric: LabelSet,
    #[serde(rename = "value")]
    pub point: SamplePair,
}

impl Sample {
    pub fn new(metric: LabelSet, timestamp: Timestamp, value: f64) -> Self {
        Self {
            metric,
            point: SamplePair::new(timestamp, value),
        }
    }
}

/// One labeled series of a range vector. Points are ordered by time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub metric: LabelSet,
    #[serde(default)]
    pub values: Vec<SamplePair>,
}

/// The kind tag carried next to every result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Scalar,
    Vector,
    Matrix,
}

impl ResultType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultType::Scalar => "scalar",
            ResultType::Vector => "vector",
            ResultType::Matrix => "matrix",
        }
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultType {
    type Err = QuickpromError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scalar" => Ok(ResultType::Scalar),
            "vector" => Ok(ResultType::Vector),
            "matrix" => Ok(ResultType::Matrix),
            other => Err(QuickpromError::NoRenderer(other.to_string())),
        }
    }
}

/// An evaluated query result.
///
/// Serializes to the backend-native encoding of the inner value, without the
/// kind tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawResult {
    Scalar(Option<SamplePair>),
    Vector(Vec<Sample>),
    Matrix(Vec<Series>),
}

impl RawResult {
    pub fn result_type(&self) -> ResultType {
        match self {
            RawResult::Scalar(_) => ResultType::Scalar,
            RawResult::Vector(_) => ResultType::Vector,
            RawResult::Matrix(_) => ResultType::Matrix,
        }
    }

    /// Build a result from its kind tag and its undecoded value.
    ///
    /// Unknown kinds fail with [`QuickpromError::NoRenderer`]; a `null` value
    /// decodes to an empty result of the tagged kind.
    pub fn from_parts(result_type: &str, result: serde_json::Value) -> crate::Result<Self> {
        let raw = match result_type.parse::<ResultType>()? {
            ResultType::Scalar => RawResult::Scalar(serde_json::from_value(result)?),
            ResultType::Vector => {
                let samples: Option<Vec<Sample>> = serde_json::from_value(result)?;
                RawResult::Vector(samples.unwrap_or_default())
            }
            ResultType::Matrix => {
                let series: Option<Vec<Series>> = serde_json::from_value(result)?;
                RawResult::Matrix(series.unwrap_or_default())
            }
        };
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timestamp_seconds_conversion() {
        let ts = Timestamp::from_seconds(1435781451.781);
        assert_eq!(ts.as_millis(), 1435781451781);
        assert_eq!(Timestamp::from_millis(4).as_seconds(), 0.004);
        assert_eq!(ts.to_datetime().timestamp_millis(), 1435781451781);
    }

    #[test]
    fn test_sample_value_special_strings() {
        assert_eq!(format_sample_value(f64::INFINITY), "+Inf");
        assert_eq!(format_sample_value(f64::NEG_INFINITY), "-Inf");
        assert_eq!(format_sample_value(f64::NAN), "NaN");
        assert_eq!(format_sample_value(1.5), "1.5");
        assert_eq!(format_sample_value(123.0), "123");
        assert!(parse_sample_value("NaN").unwrap().is_nan());
        assert_eq!(parse_sample_value("+Inf"), Some(f64::INFINITY));
        assert_eq!(parse_sample_value("-Inf"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_sample_value("0.25"), Some(0.25));
        assert_eq!(parse_sample_value("1e3"), Some(1000.0));
        assert_eq!(parse_sample_value("abc"), None);
    }

    #[test]
    fn test_sample_value_exponent_form() {
        assert_eq!(format_sample_value(1e-7), "1e-07");
        assert_eq!(format_sample_value(-2.5e-9), "-2.5e-09");
        assert_eq!(format_sample_value(1e21), "1e+21");
        assert_eq!(format_sample_value(1.5e22), "1.5e+22");
        // Inside the plain range
        assert_eq!(format_sample_value(1e-6), "0.000001");
        assert_eq!(format_sample_value(123456789.0), "123456789");
        assert_eq!(format_sample_value(0.0), "0");
        assert_eq!(parse_sample_value("1e-07"), Some(1e-7));
    }

    #[test]
    fn test_timestamp_encoding() {
        let whole = serde_json::to_value(Timestamp::from_millis(1_700_000_040_000)).unwrap();
        assert_eq!(whole, json!(1700000040));
        assert!(whole.is_i64());

        let fractional = serde_json::to_string(&Timestamp::from_millis(1_700_000_000_004)).unwrap();
        assert_eq!(fractional, "1700000000.004");
        assert_eq!(serde_json::to_string(&Timestamp::from_millis(-1500)).unwrap(), "-1.5");
    }

    #[test]
    fn test_out_of_range_timestamp_is_rejected() {
        let err = RawResult::from_parts("scalar", json!([1e20, "1"])).unwrap_err();
        assert!(matches!(err, QuickpromError::Json(_)));
        assert!(err.to_string().contains("out of range"));

        assert_eq!(Timestamp::from_millis(i64::MAX).checked_datetime(), None);
        assert_eq!(Timestamp::from_millis(i64::MAX).to_datetime(), DateTime::<Utc>::default());
    }

    #[test]
    fn test_decode_vector() {
        let result = RawResult::from_parts(
            "vector",
            json!([
                {"metric": {"job": "api"}, "value": [0.004, "123"]},
                {"metric": {}, "value": [0.004, "NaN"]}
            ]),
        )
        .unwrap();

        let RawResult::Vector(samples) = result else {
            panic!("expected vector");
        };
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].metric["job"], "api");
        assert_eq!(samples[0].point.timestamp, Timestamp::from_millis(4));
        assert_eq!(samples[0].point.value, 123.0);
        assert!(samples[1].point.value.is_nan());
    }

    #[test]
    fn test_decode_matrix() {
        let result = RawResult::from_parts(
            "matrix",
            json!([{"metric": {"a": "1"}, "values": [[1, "1"], [2, "2.5"]]}]),
        )
        .unwrap();

        assert_eq!(result.result_type(), ResultType::Matrix);
        let RawResult::Matrix(series) = result else {
            panic!("expected matrix");
        };
        assert_eq!(series[0].values.len(), 2);
        assert_eq!(series[0].values[1].timestamp, Timestamp::from_millis(2000));
        assert_eq!(series[0].values[1].value, 2.5);
    }

    #[test]
    fn test_decode_scalar_and_null() {
        let scalar = RawResult::from_parts("scalar", json!([10.5, "3"])).unwrap();
        assert_eq!(
            scalar,
            RawResult::Scalar(Some(SamplePair::new(Timestamp::from_millis(10500), 3.0)))
        );

        assert_eq!(
            RawResult::from_parts("scalar", serde_json::Value::Null).unwrap(),
            RawResult::Scalar(None)
        );
        assert_eq!(
            RawResult::from_parts("vector", serde_json::Value::Null).unwrap(),
            RawResult::Vector(vec![])
        );
    }

    #[test]
    fn test_unknown_result_type_has_no_renderer() {
        let err = RawResult::from_parts("string", json!([1, "hello"])).unwrap_err();
        assert!(matches!(err, QuickpromError::NoRenderer(kind) if kind == "string"));
    }

    #[test]
    fn test_invalid_sample_value_is_rejected() {
        let err = RawResult::from_parts("scalar", json!([1, "twelve"])).unwrap_err();
        assert!(matches!(err, QuickpromError::Json(_)));
    }

    #[test]
    fn test_serialize_native_encoding() {
        let mut metric = LabelSet::new();
        metric.insert("job".to_string(), "api".to_string());
        let result = RawResult::Vector(vec![Sample::new(
            metric,
            Timestamp::from_millis(1500),
            f64::INFINITY,
        )]);

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!([{"metric": {"job": "api"}, "value": [1.5, "+Inf"]}])
        );
        assert_eq!(
            serde_json::to_value(RawResult::Scalar(None)).unwrap(),
            serde_json::Value::Null
        );
    }
}

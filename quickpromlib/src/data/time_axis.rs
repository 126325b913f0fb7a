//! The seen-times axis of a range result.
//!
//! Every distinct timestamp reported by any series, sorted ascending. Two
//! timestamps are the same axis point only if they are exactly equal; no
//! bucketing is applied, so series scraped a few milliseconds apart produce
//! separate columns.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use super::model::{Series, Timestamp};

/// Sorted, deduplicated timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeAxis {
    times: Vec<Timestamp>,
}

impl TimeAxis {
    /// Build an axis from timestamps in any order.
    pub fn from_timestamps(timestamps: impl IntoIterator<Item = Timestamp>) -> Self {
        let unique: BTreeSet<Timestamp> = timestamps.into_iter().collect();
        Self {
            times: unique.into_iter().collect(),
        }
    }

    /// Build an axis from every point of every series.
    pub fn from_series(series: &[Series]) -> Self {
        Self::from_timestamps(
            series
                .iter()
                .flat_map(|s| s.values.iter().map(|p| p.timestamp)),
        )
    }

    pub fn times(&self) -> &[Timestamp] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn min(&self) -> Option<Timestamp> {
        self.times.first().copied()
    }

    pub fn max(&self) -> Option<Timestamp> {
        self.times.last().copied()
    }

    /// The axis as absolute instants.
    pub fn datetimes(&self) -> Vec<DateTime<Utc>> {
        self.times.iter().map(|t| t.to_datetime()).collect()
    }
}

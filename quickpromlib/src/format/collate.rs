//! Alignment of range series onto the shared time axis.
//!
//! Each series is sparse: it only has points at the times it was sampled.
//! Table output needs one cell per (series, axis time), so every series is
//! merged against the axis with a cursor. Both the series points and the axis
//! must be sorted ascending; the merge is linear in their combined length.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::formatted::{FormattedRangeVector, FormattedSeries};

/// One row per series, one cell per axis time; `None` marks a gap.
pub type CollatedGrid = Vec<Vec<Option<f64>>>;

/// Align every series onto `seen_times`.
pub fn collate(series: &[FormattedSeries], seen_times: &[DateTime<Utc>]) -> CollatedGrid {
    debug!(rows = series.len(), columns = seen_times.len(), "collating");
    series
        .iter()
        .map(|s| collate_series(s, seen_times))
        .collect()
}

fn collate_series(series: &FormattedSeries, seen_times: &[DateTime<Utc>]) -> Vec<Option<f64>> {
    let points = &series.values;
    let mut cursor = 0;

    seen_times
        .iter()
        .map(|seen| {
            while cursor < points.len() && points[cursor].time < *seen {
                cursor += 1;
            }

            match points.get(cursor) {
                Some(point) if point.time == *seen => Some(point.value),
                _ => None,
            }
        })
        .collect()
}

impl FormattedRangeVector {
    /// Align this result's series onto its own seen-times axis.
    pub fn collate(&self) -> CollatedGrid {
        collate(&self.series, &self.seen_times)
    }
}

//! Options controlling how a result is rendered.

use chrono::{DateTime, FixedOffset, Local, Utc};

use crate::output::rules::ScientificThresholds;

/// Time zone used when printing timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayZone {
    /// The machine's local zone
    #[default]
    Local,
    Utc,
}

impl DisplayZone {
    /// Express `time` in this zone, keeping the offset for printing.
    pub fn localize(self, time: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            DisplayZone::Local => time.with_timezone(&Local).fixed_offset(),
            DisplayZone::Utc => time.fixed_offset(),
        }
    }
}

/// Options for rendering a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Draw range vectors as a table with one column per timestamp
    pub range_table: bool,
    /// Emit the raw result as JSON instead of text
    pub json: bool,
    /// Zone timestamps are printed in
    pub zone: DisplayZone,
    /// When to switch numbers to scientific notation
    pub thresholds: ScientificThresholds,
}

impl RenderOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render range vectors as tables.
    pub fn range_table(mut self, enabled: bool) -> Self {
        self.range_table = enabled;
        self
    }

    /// Emit JSON instead of text.
    pub fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Set the display time zone.
    pub fn zone(mut self, zone: DisplayZone) -> Self {
        self.zone = zone;
        self
    }

    /// Set the scientific notation thresholds.
    pub fn thresholds(mut self, thresholds: ScientificThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = RenderOptions::new()
            .range_table(true)
            .zone(DisplayZone::Utc)
            .thresholds(ScientificThresholds { low: -3, high: 9 });

        assert!(options.range_table);
        assert!(!options.json);
        assert_eq!(options.zone, DisplayZone::Utc);
        assert_eq!(options.thresholds.high, 9);
    }

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert!(!options.range_table);
        assert!(!options.json);
        assert_eq!(options.zone, DisplayZone::Local);
        assert_eq!(options.thresholds, ScientificThresholds::default());
    }

    #[test]
    fn test_utc_localize_keeps_instant() {
        let time = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let local = DisplayZone::Utc.localize(time);
        assert_eq!(local.offset().local_minus_utc(), 0);
        assert_eq!(local.timestamp_millis(), 1_700_000_000_123);
        assert_eq!(
            DisplayZone::Local.localize(time).timestamp_millis(),
            1_700_000_000_123
        );
    }
}

//! Text rendering of formatted results.
//!
//! The [`Renderer`] is built with everything it depends on: whether the
//! output is an interactive terminal, which [`TableWriter`] draws tables and
//! the [`RenderOptions`]. Nothing is read from the process environment, so
//! output is fully determined by its inputs.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::{DateTime, FixedOffset, Utc};
use console::Style;
use tracing::debug;

use super::json::render_json;
use super::rules::{FloatFormat, TimeFormat, DATE_FORMAT, TIMESTAMP_FORMAT};
use super::table::{BorderedTable, Column, TabSeparated, Table, TableWriter};
use crate::data::model::RawResult;
use crate::format::{
    format_value, FormattedInstantVector, FormattedRangeVector, FormattedResult, FormattedScalar,
    FormattedValue,
};
use crate::options::RenderOptions;
use crate::Result;

/// Printed instead of any body when a result has no samples.
pub const EMPTY_RESULT: &str = "(empty result)";

/// Capability of the output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// A tty: bold emphasis and bordered tables
    Interactive,
    /// A pipe or file: plain text and tab-separated tables
    Plain,
}

impl Terminal {
    pub fn from_is_term(is_term: bool) -> Self {
        if is_term {
            Terminal::Interactive
        } else {
            Terminal::Plain
        }
    }

    pub fn is_interactive(self) -> bool {
        self == Terminal::Interactive
    }

    /// The table writer that suits this terminal.
    pub fn table_writer(self) -> Box<dyn TableWriter> {
        match self {
            Terminal::Interactive => Box::new(BorderedTable::default()),
            Terminal::Plain => Box::new(TabSeparated),
        }
    }
}

pub struct Renderer {
    terminal: Terminal,
    table_writer: Box<dyn TableWriter>,
    options: RenderOptions,
    emphasis: Style,
}

impl Renderer {
    pub fn new(
        terminal: Terminal,
        table_writer: Box<dyn TableWriter>,
        options: RenderOptions,
    ) -> Self {
        let emphasis = if terminal.is_interactive() {
            Style::new().bold().force_styling(true)
        } else {
            Style::new()
        };

        Self {
            terminal,
            table_writer,
            options,
            emphasis,
        }
    }

    /// Renderer using the default table writer for `terminal`.
    pub fn for_terminal(terminal: Terminal, options: RenderOptions) -> Self {
        Self::new(terminal, terminal.table_writer(), options)
    }

    pub fn terminal(&self) -> Terminal {
        self.terminal
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a raw result: as JSON when requested, otherwise formatted text.
    pub fn render_raw(&self, raw: &RawResult, out: &mut dyn Write) -> Result<()> {
        if self.options.json {
            debug!(result_type = %raw.result_type(), "rendering JSON");
            return render_json(raw, out);
        }
        self.render(&format_value(raw), out)
    }

    /// Render a formatted result as text.
    pub fn render(&self, result: &FormattedResult, out: &mut dyn Write) -> Result<()> {
        if result.is_empty() {
            writeln!(out, "{EMPTY_RESULT}")?;
            return Ok(());
        }

        debug!(
            result_type = %result.result_type(),
            terminal = ?self.terminal,
            "rendering text"
        );

        match result {
            FormattedResult::Scalar(scalar) => self.render_scalar(scalar, out),
            FormattedResult::InstantVector(vector) => self.render_instant_vector(vector, out),
            FormattedResult::RangeVector(range) => self.render_range_vector(range, out),
        }
    }

    // ========================================================================
    // Result kinds
    // ========================================================================

    fn render_scalar(&self, scalar: &FormattedScalar, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", self.bold("Scalar:"))?;

        let Some(point) = &scalar.point else {
            return Ok(());
        };
        self.write_at(point.time, out)?;
        writeln!(out)?;

        let float = self.float_format(&scalar.info);
        let mut table = Table::new(vec![Column::right("value")]);
        table.push_row(vec![float.format(point.value)]);
        self.table_writer.write_table(&table, out)?;
        Ok(())
    }

    fn render_instant_vector(
        &self,
        vector: &FormattedInstantVector,
        out: &mut dyn Write,
    ) -> Result<()> {
        writeln!(out, "{}", self.bold("Instant vector:"))?;
        if let Some(time) = vector.time {
            self.write_at(time, out)?;
        }
        self.write_common_labels(&vector.info.common_labels, out)?;
        writeln!(out)?;

        let float = self.float_format(&vector.info);
        let mut table = Table::new(label_columns(&vector.info));
        table.columns.push(Column::right("value"));
        for sample in &vector.samples {
            let mut row = sample.label_values.clone();
            row.push(float.format(sample.value));
            table.push_row(row);
        }

        self.table_writer.write_table(&table, out)?;
        Ok(())
    }

    fn render_range_vector(&self, range: &FormattedRangeVector, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", self.bold("Range vector:"))?;
        self.write_common_labels(&range.info.common_labels, out)?;

        let seen: Vec<DateTime<FixedOffset>> = range
            .seen_times
            .iter()
            .map(|&t| self.options.zone.localize(t))
            .collect();
        let time_format = TimeFormat::for_times(&seen);
        debug!(row = time_format.row, date_header = time_format.date_header, "time format");

        if time_format.date_header {
            if let Some(first) = seen.first() {
                writeln!(out, "  All on date: {}", first.format(DATE_FORMAT))?;
            }
        }
        writeln!(out)?;

        let float = self.float_format(&range.info);
        if self.options.range_table {
            self.write_range_table(range, &seen, time_format, float, out)
        } else {
            self.write_range_list(range, time_format, float, out)
        }
    }

    // ========================================================================
    // Range vector bodies
    // ========================================================================

    fn write_range_table(
        &self,
        range: &FormattedRangeVector,
        seen: &[DateTime<FixedOffset>],
        time_format: TimeFormat,
        float: FloatFormat,
        out: &mut dyn Write,
    ) -> Result<()> {
        let mut table = Table::new(label_columns(&range.info));
        table
            .columns
            .extend(seen.iter().map(|t| Column::right(time_format.format(t))));

        for (series, cells) in range.series.iter().zip(range.collate()) {
            let mut row = series.label_values.clone();
            row.extend(
                cells
                    .into_iter()
                    .map(|cell| cell.map(|v| float.format(v)).unwrap_or_default()),
            );
            table.push_row(row);
        }

        self.table_writer.write_table(&table, out)?;
        Ok(())
    }

    fn write_range_list(
        &self,
        range: &FormattedRangeVector,
        time_format: TimeFormat,
        float: FloatFormat,
        out: &mut dyn Write,
    ) -> Result<()> {
        for series in &range.series {
            if range.info.varying_labels.is_empty() {
                writeln!(out, "{{}}:")?;
            } else {
                let header: Vec<String> = range
                    .info
                    .varying_labels
                    .iter()
                    .zip(&series.label_values)
                    .map(|(name, value)| format!("{} {}", self.bold(&format!("{name}:")), value))
                    .collect();
                writeln!(out, "{}:", header.join(", "))?;
            }

            for point in &series.values {
                let time = self.options.zone.localize(point.time);
                writeln!(
                    out,
                    "  {}: {}",
                    time_format.format(&time),
                    float.format(point.value)
                )?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Shared pieces
    // ========================================================================

    fn write_at(&self, time: DateTime<Utc>, out: &mut dyn Write) -> Result<()> {
        let time = self.options.zone.localize(time);
        writeln!(out, "  At: {}", time.format(TIMESTAMP_FORMAT))?;
        Ok(())
    }

    fn write_common_labels(
        &self,
        labels: &BTreeMap<String, String>,
        out: &mut dyn Write,
    ) -> Result<()> {
        if labels.is_empty() {
            return Ok(());
        }

        let pairs: Vec<String> = labels
            .iter()
            .map(|(name, value)| format!("{} {}", self.bold(&format!("{name}:")), value))
            .collect();
        writeln!(out, "  All have labels: {}", pairs.join(", "))?;
        Ok(())
    }

    fn float_format(&self, info: &FormattedValue) -> FloatFormat {
        let float = FloatFormat::best_with(&info.magnitude, self.options.thresholds);
        debug!(?float, magnitude = ?info.magnitude, "float format");
        float
    }

    fn bold(&self, text: &str) -> String {
        self.emphasis.apply_to(text).to_string()
    }
}

fn label_columns(info: &FormattedValue) -> Vec<Column> {
    info.varying_labels.iter().map(Column::left).collect()
}

//! Table-ready data and the writers that draw it.
//!
//! A [`Table`] holds already-formatted cell strings; writers only lay them
//! out. Two writers exist:
//!
//! - [`BorderedTable`]: box-drawn borders and bold headers, for interactive
//!   terminals
//! - [`TabSeparated`]: one tab-delimited line per row, for pipes and files
//!
//! The renderer receives a writer at construction, so tests can pick one
//! without a real terminal.

use std::io::{self, Write};

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement};

/// Horizontal alignment of a column's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

impl From<Align> for CellAlignment {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => CellAlignment::Left,
            Align::Right => CellAlignment::Right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub title: String,
    pub align: Align,
}

impl Column {
    pub fn left(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            align: Align::Left,
        }
    }

    pub fn right(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            align: Align::Right,
        }
    }
}

/// Column headers plus rows of formatted cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

/// Draws a [`Table`] onto an output stream.
pub trait TableWriter {
    fn write_table(&self, table: &Table, out: &mut dyn Write) -> io::Result<()>;
}

/// Box-drawn table, optionally with bold headers.
#[derive(Debug, Clone, Copy)]
pub struct BorderedTable {
    bold_headers: bool,
}

impl BorderedTable {
    pub fn new(bold_headers: bool) -> Self {
        Self { bold_headers }
    }

    fn build(&self, table: &Table) -> comfy_table::Table {
        let mut drawn = comfy_table::Table::new();
        drawn
            .load_preset(UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Disabled);

        // Styling follows the caller's terminal decision, not comfy_table's own tty probe
        if self.bold_headers {
            drawn.enforce_styling();
        } else {
            drawn.force_no_tty();
        }

        drawn.set_header(table.columns.iter().map(|column| {
            let cell = Cell::new(&column.title).set_alignment(column.align.into());
            if self.bold_headers {
                cell.add_attribute(Attribute::Bold)
            } else {
                cell
            }
        }));

        for row in &table.rows {
            drawn.add_row(table.columns.iter().enumerate().map(|(i, column)| {
                Cell::new(row.get(i).map(String::as_str).unwrap_or_default())
                    .set_alignment(column.align.into())
            }));
        }
        drawn
    }
}

impl Default for BorderedTable {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TableWriter for BorderedTable {
    fn write_table(&self, table: &Table, out: &mut dyn Write) -> io::Result<()> {
        if table.columns.is_empty() {
            return Ok(());
        }
        writeln!(out, "{}", self.build(table))
    }
}

/// Borderless, tab-delimited output that stays friendly to `cut` and `awk`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabSeparated;

impl TableWriter for TabSeparated {
    fn write_table(&self, table: &Table, out: &mut dyn Write) -> io::Result<()> {
        let header: Vec<&str> = table.columns.iter().map(|c| c.title.as_str()).collect();
        writeln!(out, "{}", header.join("\t"))?;
        for row in &table.rows {
            writeln!(out, "{}", row.join("\t"))?;
        }
        Ok(())
    }
}

//! Output: present formatted results as text or JSON.
//!
//! This module handles the last stage of the pipeline - turning a formatted
//! result into bytes on a stream. It provides:
//!
//! - **Rules**: Adaptive number and timestamp formats chosen per result
//! - **Tables**: Table-ready data plus bordered and tab-separated writers
//! - **Renderer**: Walks a formatted result and writes the text layout
//! - **JSON**: Serializes the raw result for machine consumption
//!
//! ## Example
//!
//! ```rust,ignore
//! use quickpromlib::output::{Renderer, Terminal};
//! use quickpromlib::RenderOptions;
//!
//! let renderer = Renderer::for_terminal(Terminal::Plain, RenderOptions::new());
//! renderer.render_raw(&raw, &mut std::io::stdout())?;
//! ```

pub mod json;
pub mod render;
pub mod rules;
pub mod table;

pub use json::render_json;
pub use render::{Renderer, Terminal, EMPTY_RESULT};
pub use rules::{
    shared_date_parts, DateParts, FloatFormat, Notation, ScientificThresholds, TimeFormat,
    DATE_FORMAT, MAX_FRACTION_DIGITS, TIMESTAMP_FORMAT,
};
pub use table::{Align, BorderedTable, Column, TabSeparated, Table, TableWriter};

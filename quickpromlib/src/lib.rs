//! # quickpromlib
//!
//! Formatting and presentation of monitoring query results: scalars, instant
//! vectors and range vectors.
//!
//! ## Overview
//!
//! A raw query result goes through a fixed pipeline:
//!
//! - **Analysis**: Which labels are shared by every item, how large the
//!   numbers are, and which timestamps occur (`data`)
//! - **Normalization**: Common labels hoisted out, varying labels projected
//!   into column order (`format`)
//! - **Collation**: Range series aligned onto the shared time axis, gaps kept
//!   as gaps (`format::collate`)
//! - **Rendering**: Adaptive number and timestamp formats, bordered or
//!   tab-separated tables, or a JSON envelope (`output`)
//!
//! Everything up to rendering is pure. The renderer receives its terminal
//! capability and table writer at construction and writes to any
//! [`std::io::Write`].
//!
//! ## Example
//!
//! ```rust
//! use quickpromlib::{parse_response, DisplayZone, RenderOptions, Renderer, Terminal};
//!
//! let body = r#"{"status": "success", "data": {"resultType": "vector", "result": [
//!     {"metric": {"job": "api", "instance": "a"}, "value": [4, "1.5"]},
//!     {"metric": {"job": "api", "instance": "b"}, "value": [4, "2"]}
//! ]}}"#;
//!
//! let raw = parse_response(body).unwrap();
//! let options = RenderOptions::new().zone(DisplayZone::Utc);
//! let renderer = Renderer::for_terminal(Terminal::Plain, options);
//!
//! let mut out = Vec::new();
//! renderer.render_raw(&raw, &mut out).unwrap();
//! let text = String::from_utf8(out).unwrap();
//!
//! assert!(text.contains("All have labels: job: api"));
//! assert!(text.ends_with("instance\tvalue\na\t1.5\nb\t2.0\n"));
//! ```

pub mod data;
pub mod error;
pub mod format;
pub mod options;
pub mod output;

pub use data::{
    parse_response, read_response, LabelSet, Magnitude, RawResult, ResultType, Sample, SamplePair,
    Series, TimeAxis, Timestamp, ValueInfo,
};
pub use error::QuickpromError;
pub use format::{collate, format_value, CollatedGrid, FormattedResult};
pub use options::{DisplayZone, RenderOptions};
pub use output::{
    render_json, BorderedTable, FloatFormat, Renderer, ScientificThresholds, TabSeparated,
    Terminal, TableWriter, TimeFormat,
};

/// Result type for quickpromlib operations
pub type Result<T> = std::result::Result<T, QuickpromError>;

//! Normalization: turn raw results into a presentation model.
//!
//! This module handles the second stage of the pipeline - mapping a raw
//! result and its analysis into display-ready records. It provides:
//!
//! - **Formatted results**: Common labels hoisted, varying labels projected
//!   into positional tuples (`FormattedResult` and its variants)
//! - **Collation**: Alignment of range series onto the shared time axis
//!
//! ## Example
//!
//! ```rust,ignore
//! use quickpromlib::format::format_value;
//!
//! let formatted = format_value(&raw);
//! if let FormattedResult::RangeVector(range) = &formatted {
//!     let grid = range.collate();
//! }
//! ```

pub mod collate;
pub mod formatted;

pub use collate::{collate, CollatedGrid};
pub use formatted::{
    format_instant_vector, format_range_vector, format_scalar, format_value,
    FormattedInstantVector, FormattedRangeVector, FormattedResult, FormattedSample,
    FormattedSamplePair, FormattedScalar, FormattedSeries, FormattedValue,
};

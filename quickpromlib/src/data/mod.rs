//! Data intake: raw results and their analysis.
//!
//! This module handles the first stage of the pipeline - decoding what the
//! backend returned and scanning it once. It provides:
//!
//! - **Model**: Raw result types (`RawResult`, `Sample`, `Series`)
//! - **Response**: Decoding of API response documents
//! - **Analysis**: Label commonality and magnitude statistics (`ValueInfo`)
//! - **Time axis**: The sorted union of a range result's timestamps
//!
//! ## Example
//!
//! ```rust,ignore
//! use quickpromlib::data::{parse_response, ValueInfo, RawResult};
//!
//! let RawResult::Vector(samples) = parse_response(body)? else { return Ok(()) };
//! let info = ValueInfo::from_vector(&samples);
//! println!("common labels: {:?}", info.common_labels());
//! ```

pub mod model;
pub mod response;
pub mod time_axis;
pub mod value_info;

pub use model::{
    format_sample_value, parse_sample_value, LabelSet, RawResult, ResultType, Sample, SamplePair,
    Series, Timestamp,
};
pub use response::{parse_response, read_response};
pub use time_axis::TimeAxis;
pub use value_info::{fraction_digits, LabelInfo, Magnitude, ValueInfo};

//! Machine-readable output.
//!
//! The raw result is written as-is, wrapped with its kind tag. None of the
//! adaptive formatting applies here.

use std::io::Write;

use serde::Serialize;

use crate::data::model::{RawResult, ResultType};
use crate::Result;

#[derive(Serialize)]
struct JsonEnvelope<'a> {
    #[serde(rename = "resultType")]
    result_type: ResultType,
    result: &'a RawResult,
}

/// Write `{"resultType": ..., "result": ...}` with two-space indentation and
/// a trailing newline.
pub fn render_json(raw: &RawResult, out: &mut dyn Write) -> Result<()> {
    let envelope = JsonEnvelope {
        result_type: raw.result_type(),
        result: raw,
    };
    serde_json::to_writer_pretty(&mut *out, &envelope)?;
    writeln!(out)?;
    Ok(())
}

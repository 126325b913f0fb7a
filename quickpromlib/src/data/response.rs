//! Decoding of query response documents.
//!
//! Two document shapes are accepted:
//!
//! - The Prometheus HTTP API envelope returned by `/api/v1/query` and
//!   `/api/v1/query_range`:
//!   `{"status": "success", "data": {"resultType": ..., "result": ...}}`
//! - A bare `{"resultType": ..., "result": ...}` object, which is what the
//!   JSON output path writes.

use std::io::Read;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::QuickpromError;
use crate::Result;

use super::model::RawResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryData {
    result_type: String,
    #[serde(default)]
    result: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    status: String,
    data: Option<QueryData>,
    error_type: Option<String>,
    error: Option<String>,
    #[serde(default)]
    warnings: Vec<String>,
}

/// Decode a response document from a string.
pub fn parse_response(input: &str) -> Result<RawResult> {
    let document: serde_json::Value = serde_json::from_str(input)?;
    decode_document(document)
}

/// Decode a response document from a reader.
pub fn read_response(reader: impl Read) -> Result<RawResult> {
    let document: serde_json::Value = serde_json::from_reader(reader)?;
    decode_document(document)
}

fn decode_document(document: serde_json::Value) -> Result<RawResult> {
    if document.get("status").is_some() {
        let response: ApiResponse = serde_json::from_value(document)?;
        decode_api_response(response)
    } else if document.get("resultType").is_some() {
        let data: QueryData = serde_json::from_value(document)?;
        decode_data(data)
    } else {
        Err(QuickpromError::MalformedResponse(
            "expected an API response with 'status' or an object with 'resultType'".to_string(),
        ))
    }
}

fn decode_api_response(response: ApiResponse) -> Result<RawResult> {
    for warning in &response.warnings {
        warn!("backend warning: {}", warning);
    }

    if response.status != "success" {
        return Err(QuickpromError::QueryFailed {
            error_type: response.error_type.unwrap_or_else(|| "unknown".to_string()),
            message: response
                .error
                .unwrap_or_else(|| format!("status '{}'", response.status)),
        });
    }

    let data = response.data.ok_or_else(|| {
        QuickpromError::MalformedResponse("successful response carries no 'data'".to_string())
    })?;
    decode_data(data)
}

fn decode_data(data: QueryData) -> Result<RawResult> {
    debug!(result_type = %data.result_type, "decoding query result");
    RawResult::from_parts(&data.result_type, data.result)
}

//! Loader for pre-parsed row files.
//!
//! Accepted JSON shapes:
//!   [ {"contig": "chr1", "pos": 1, "logR": 0.2}, ... ]
//!   { "data": [ {"contig": "chr1", ...}, ... ] }
//!
//! Parsing of the raw SEG/TSV formats happens upstream; this only reads its output.

use crate::files::row::{Row, UploadedFile};
use crate::Result;
use anyhow::{Context, bail};
use serde::Deserialize;
use serde_json::Value;
use std::fs;

/// Row file shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RowsFileSpec {
    // Plain array of rows.
    Rows(Vec<Value>),
    // Uploaded-file shape: { "data": [...] }
    Wrapped { data: Vec<Value> },
}

/// Read a row file from disk.
pub fn load_rows_file(path: &str) -> Result<UploadedFile> {
    let text = fs::read_to_string(path).with_context(|| format!("read rows file {}", path))?;
    parse_rows(&text).with_context(|| format!("parse rows file {}", path))
}

/// Parse row file text. Every entry must be a JSON object.
pub fn parse_rows(text: &str) -> Result<UploadedFile> {
    let spec: RowsFileSpec = serde_json::from_str(text)?;
    let values = match spec {
        RowsFileSpec::Rows(v) | RowsFileSpec::Wrapped { data: v } => v,
    };

    let mut data: Vec<Row> = Vec::with_capacity(values.len());
    for (idx, value) in values.into_iter().enumerate() {
        match value {
            Value::Object(row) => data.push(row),
            other => bail!(
                "row {} is not an object: {}",
                idx,
                type_name(&other)
            ),
        }
    }

    Ok(UploadedFile::new(data))
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

use crate::config::InputFormat;
use crate::errors::InputError;
use crate::record::RawRecord;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::trace;

/// Reads every record from the file at `path`. The format is taken from
/// `format` when given, otherwise from the file extension.
pub fn load_records(path: &Path, format: Option<InputFormat>) -> Result<Vec<RawRecord>, InputError> {
    let format = match format.or_else(|| InputFormat::from_path(path)) {
        Some(format) => format,
        None => return Err(InputError::UnknownFormat(path.to_path_buf())),
    };

    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let records = match format {
        InputFormat::Csv => read_csv(reader)?,
        InputFormat::Json => read_json(reader)?,
    };
    trace!("read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Reads CSV rows keyed by the header row.
///
/// Fields are not trimmed, so account names keep any surrounding whitespace
/// they were written with.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawRecord>, InputError> {
    let mut iter = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in iter.deserialize() {
        let row: RawRecord = row?;
        records.push(row);
    }

    Ok(records)
}

/// Reads a JSON array of flat objects. Numbers and booleans are kept as
/// their textual form and null becomes an empty string.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<RawRecord>, InputError> {
    let document: Value = serde_json::from_reader(reader)?;
    let rows = match document {
        Value::Array(rows) => rows,
        other => return Err(InputError::NotAnArray(kind(&other))),
    };

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| match row {
            Value::Object(fields) => Ok(fields
                .into_iter()
                .map(|(key, value)| (key, stringify(value)))
                .collect()),
            other => Err(InputError::NotAnObject(kind(&other), index)),
        })
        .collect()
}

fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

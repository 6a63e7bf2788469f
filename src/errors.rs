use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that prevent a batch from being read at all. Unlike malformed
/// fields these are fatal to the run.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode csv record: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to decode json document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("json input must be an array of objects, found {0} at index {1}")]
    NotAnObject(&'static str, usize),

    #[error("json input must be an array of records, found {0}")]
    NotAnArray(&'static str),

    #[error("unable to infer input format for {}, pass --format csv|json", .0.display())]
    UnknownFormat(PathBuf),
}

#[derive(Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("unsupported input format {0:?}, expected csv or json")]
    UnsupportedFormat(String),

    #[error("malformed synonym {0:?}, expected Alias=Canonical")]
    MalformedSynonym(String),

    #[error("synonym {alias:?} targets unknown field {canonical:?}")]
    UnknownField { alias: String, canonical: String },
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("line editor failure: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("failed to write query output: {0}")]
    Output(#[from] io::Error),
}

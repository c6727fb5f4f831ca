use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong in a single run. All of these are fatal;
/// nothing is retried.
#[derive(Error, Debug)]
pub enum Error {
    #[error("couldn't read options file {path:?}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid line: {0}")]
    InvalidLine(String),

    #[error("unknown section: {0:?}")]
    UnknownSection(String),

    #[error("invalid bool value for key {key}: {value:?}")]
    InvalidBool { key: String, value: String },

    #[error("invalid int value for key {key}: {value:?}")]
    InvalidInt { key: String, value: String },

    #[error("no {0} provided")]
    MissingParameter(&'static str),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP status {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("zone not found: {0}")]
    ZoneNotFound(String),

    #[error("record not found: {0}")]
    RecordNotFound(String),
}

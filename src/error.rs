//! Error types for detector construction, configuration and replay.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unrecognised detector mode: {0}")]
    UnknownMode(String),

    #[error("Unrecognised detector material: {0}")]
    UnknownMaterial(String),

    #[error("Unrecognised detector kind: {0}")]
    UnknownKind(String),

    #[error("Unrecognised source name: {0}")]
    UnknownSource(String),

    #[error("Cannot use a zero-length phantom as a source")]
    ZeroLengthPhantom,

    #[error("Invalid detector length: {0} mm")]
    InvalidLength(f64),

    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

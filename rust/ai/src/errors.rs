use blackjack_engine::errors::GameError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures loading or saving a persisted action-value table.
///
/// Every variant is fatal for execution: there is no partial-load fallback.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("Model file {} is malformed: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },
    #[error("Model file {} has unsupported format version {found} (expected {expected})", path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        expected: u32,
    },
    #[error("Model I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures constructing a policy by name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Unknown policy type: {0}")]
    Unknown(String),
    #[error("Policy {0} needs a trained model")]
    MissingTable(String),
}

/// Rejected epsilon schedule parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("epsilon {name} must be in [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f64 },
    #[error("epsilon floor {floor} is above start {start}")]
    FloorAboveStart { start: f64, floor: f64 },
    #[error("exponential decay rate must be in (0, 1], got {0}")]
    InvalidRate(f64),
}

/// Failures of the execution loop.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Game(#[from] GameError),
}

//! Error type for the gk-cli binary.

use gk_gas::{DomainError, GasError, LoadError, PreconditionViolation, SweepError};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Gas(#[from] GasError),

    #[error("Sweep error: {0}")]
    Sweep(#[from] SweepError),

    #[error("Sweep point T = {value} K failed: {source}")]
    SweepPoint { value: f64, source: GasError },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to write output file: {path}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;

impl From<LoadError> for CliError {
    fn from(err: LoadError) -> Self {
        CliError::Gas(err.into())
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Gas(err.into())
    }
}

impl From<PreconditionViolation> for CliError {
    fn from(err: PreconditionViolation) -> Self {
        CliError::Gas(err.into())
    }
}

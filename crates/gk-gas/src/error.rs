//! Gas model errors.

use crate::state::StatePhase;
use gk_core::CoreError;
use gk_defs::{DefinitionError, FitKind, ValidationError};
use thiserror::Error;

/// Result type for gas model operations.
pub type GasResult<T> = Result<T, GasError>;

/// Errors raised while turning a model definition into a [`GasModel`](crate::GasModel).
#[derive(Error, Debug)]
pub enum LoadError {
    /// The definition could not be read or parsed.
    #[error("Model definition error: {0}")]
    Definition(#[from] DefinitionError),

    /// The definition parsed but is incomplete or inconsistent.
    #[error("Invalid model definition: {0}")]
    Validation(#[from] ValidationError),

    /// A curve-fit table violates the segment invariants.
    #[error("Species '{species}' {fit} fit: {reason}")]
    InvalidFit {
        species: String,
        fit: FitKind,
        reason: &'static str,
    },

    /// Molecular weight is non-positive or non-finite.
    #[error("Species '{species}': molecular weight must be positive, got {value}")]
    InvalidMolecularWeight { species: String, value: f64 },

    #[error("Duplicate species: {name}")]
    DuplicateSpecies { name: String },

    #[error("Model defines no species")]
    NoSpecies,
}

/// Why a composition was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompositionIssue {
    #[error("unknown species '{name}'")]
    UnknownSpecies { name: String },

    #[error("species '{name}' given more than once")]
    DuplicateSpecies { name: String },

    #[error("fraction of '{name}' is {value}, expected a finite value in [0, 1]")]
    FractionOutOfBounds { name: String, value: f64 },

    #[error("fractions sum to {sum}, expected 1 within {tolerance}")]
    BadSum { sum: f64, tolerance: f64 },

    #[error("expected {expected} fractions, got {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// Composition was built for a model with a different species list.
    #[error("composition is over species {found:?}, model has {expected:?}")]
    SpeciesMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

/// Caller-input errors from the thermodynamic and transport evaluators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid composition: {0}")]
    InvalidComposition(CompositionIssue),

    /// Temperature outside a species' curve-fit validity window.
    #[error(
        "T = {t} K is outside the {fit} fit of species '{species}' (valid {t_lo} K to {t_hi} K)"
    )]
    OutOfRange {
        species: String,
        fit: FitKind,
        t: f64,
        t_lo: f64,
        t_hi: f64,
    },

    /// Active species share no common temperature window for a fit.
    #[error("Active species have no common {fit} validity window")]
    NoCommonRange { fit: FitKind },

    #[error("Non-physical value for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    /// Target of an inverse solve is not reachable inside the validity window.
    #[error("{what} = {value} is outside the attainable range [{min}, {max}]")]
    NoSolution {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("No convergence solving for T from {what} after {iterations} iterations")]
    ConvergenceFailed {
        what: &'static str,
        iterations: usize,
    },
}

impl From<CompositionIssue> for DomainError {
    fn from(issue: CompositionIssue) -> Self {
        DomainError::InvalidComposition(issue)
    }
}

impl From<CoreError> for DomainError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, value } | CoreError::NonPositive { what, value } => {
                DomainError::NonPhysical { what, value }
            }
        }
    }
}

/// A derived property was read before the update that defines it succeeded.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{property} is not available: requires {required} state, current state is {actual}")]
pub struct PreconditionViolation {
    pub property: &'static str,
    pub required: StatePhase,
    pub actual: StatePhase,
}

/// Umbrella error for callers that drive the whole engine.
#[derive(Error, Debug)]
pub enum GasError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Precondition(#[from] PreconditionViolation),
}

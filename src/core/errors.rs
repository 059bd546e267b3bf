use crate::protocols::{BasisLabel, Participant};
use num_complex::Complex64;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum GateError {
    #[error("Matrix is not Unitary (U†U != I)")]
    NonUnitary,

    #[error("Matrix must be square")]
    NotSquareMatrix,

    #[error("Invalid Dimensions")]
    InvalidDimensions,

    #[error("Qubit {0} cannot be both control and target")]
    ControlTargetOverlap(usize),

    #[error("Duplicate qubit index found: {0}")]
    DuplicateQubit(usize),
}

#[derive(Error, Debug, Clone)]
pub enum StateError {
    #[error("Trace is not unity: {0}")]
    InvalidTrace(Complex64),

    #[error("Vector is not normalized. Norm squared: {0}")]
    NotNormalized(f64),

    #[error("Invalid dimensions")]
    InvalidDimensions,

    #[error("Dimension mismatch")]
    DimensionMismatch {
        expected: usize,
        got_rows: usize,
        got_cols: usize,
    },

    #[error("Qubit index out of bounds")]
    IndexOutOfBounds { index: usize, num_qubits: usize },

    #[error("Gate error: {0}")]
    GateError(#[from] GateError),
}

#[derive(Error, Debug, Clone)]
pub enum ProtocolError {
    #[error("Unknown basis label: {0:?}")]
    UnknownBasisLabel(String),

    #[error("Correlation table has no observations for basis pair ({alice}, {bob})")]
    IncompleteCorrelationTable {
        alice: BasisLabel,
        bob: BasisLabel,
    },

    #[error("Invalid probability: {0}. Must be between 0.0 and 1.0")]
    InvalidProbability(f64),

    #[error("{0} has no basis options to choose from")]
    EmptyBasisOptions(Participant),

    #[error("Invalid CHSH thresholds: classical bound {classical_bound} exceeds robust threshold {robust_threshold}")]
    InvalidThresholds {
        classical_bound: f64,
        robust_threshold: f64,
    },

    #[error("State error: {0}")]
    StateError(#[from] StateError),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;

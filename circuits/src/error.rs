//! Error types for the simulation core

use crate::{MAX_GATES, MAX_QUBITS};
use thiserror::Error;

/// Simulation error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulatorError {
    #[error("qubit count {0} outside supported range [1, {MAX_QUBITS}]")]
    InvalidQubitCount(usize),

    #[error("qubit index {0} out of range for {1}-qubit register")]
    InvalidQubitIndex(usize, usize),

    #[error("basis state index {0} out of range [0, {1})")]
    InvalidStateIndex(usize, usize),

    #[error("qubit indices must differ for two-qubit gates: got {0} and {1}")]
    SameQubitIndex(usize, usize),

    #[error("circuit expects {expected} qubits, state has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("circuit has reached its capacity of {MAX_GATES} gates")]
    CapacityExceeded,

    #[error("state norm {0:.3e} is below the degenerate threshold; not renormalised")]
    DegenerateNorm(f64),

    #[error("failed to allocate amplitude buffer of {0} entries")]
    AllocationFailed(usize),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SimulatorError>;

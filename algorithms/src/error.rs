//! Error types for the algorithm crate

use qsim_circuits::SimulatorError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgorithmError {
    #[error("search database is empty")]
    EmptyDatabase,

    #[error("database of {0} items does not fit in a {1}-qubit register")]
    DatabaseTooLarge(usize, usize),

    #[error(transparent)]
    Simulator(#[from] SimulatorError),
}

pub type Result<T> = std::result::Result<T, AlgorithmError>;

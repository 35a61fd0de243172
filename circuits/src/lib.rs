//! # QSIM Simulation Core
//!
//! Dense state-vector simulation of quantum registers up to 20 qubits.
//!
//! ## Features
//!
//! - **State**: Owned amplitude vector over the computational basis with
//!   initialisation, normalisation, probability queries and projective
//!   measurement (single qubit or full register)
//! - **Gates**: In-place, allocation-free kernels for the fixed gate set
//!   (Pauli X/Y/Z, Hadamard, Phase, rotations, CNOT, CZ, SWAP)
//! - **Circuit**: Bounded ordered gate list with an interpreter that
//!   dispatches to the kernels
//! - **Measurement**: Non-collapsing sampling statistics for histograms
//!   and distribution tests
//!
//! Qubit `k` contributes bit `k` of the basis index, so qubit 0 is the
//! least significant bit and the rightmost digit of a printed basis
//! label.
//!
//! ## Example
//!
//! ```rust
//! use qsim_circuits::{Circuit, QuantumState};
//! use rand::SeedableRng;
//!
//! let mut state = QuantumState::zero_state(2).unwrap();
//! let mut circuit = Circuit::new(2, "bell").unwrap();
//! circuit.add_hadamard(0).unwrap();
//! circuit.add_cnot(0, 1).unwrap();
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! circuit.execute(&mut state, &mut rng).unwrap();
//! assert!((state.probability(0b00) - 0.5).abs() < 1e-12);
//! ```

pub mod circuit;
pub mod error;
pub mod gates;
pub mod measurement;
pub mod state;

pub use circuit::{Circuit, GateOp};
pub use error::{Result, SimulatorError};
pub use measurement::{sample_counts, SampleStatistics};
pub use state::{format_basis_state, QuantumState};

use num_complex::Complex64;

/// Complex number type alias
pub type Complex = Complex64;

/// Zero complex number
pub const ZERO: Complex = Complex64::new(0.0, 0.0);

/// One complex number
pub const ONE: Complex = Complex64::new(1.0, 0.0);

/// Imaginary unit
pub const I: Complex = Complex64::new(0.0, 1.0);

/// 1/sqrt(2) for Hadamard normalisation
pub const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Largest supported register size
pub const MAX_QUBITS: usize = 20;

/// Capacity bound of a circuit's gate list
pub const MAX_GATES: usize = 1000;

/// Module version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

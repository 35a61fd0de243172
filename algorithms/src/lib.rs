//! # QSIM Quantum Algorithms
//!
//! Reference algorithm workloads on top of the simulation core.
//!
//! ## Implemented Algorithms
//!
//! - **Grover's search**: amplitude amplification, both as a circuit
//!   builder over the full register and as a direct engine with
//!   sparse-subspace diffusion for database search
//! - **Shor's factoring**: hybrid driver mixing classical trial
//!   division with simulated order finding
//! - **QFT**: simplified quantum Fourier transform over the full
//!   register, with its exact inverse
//!
//! ## Example
//!
//! ```rust
//! use qsim_algorithms::grover::{run_database_search, TargetQuery};
//! use qsim_circuits::QuantumState;
//! use rand::SeedableRng;
//!
//! let names = ["apple", "banana", "cherry", "date"];
//! let mut state = QuantumState::new(2).unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let outcome =
//!     run_database_search(&mut state, &names, &TargetQuery::Name("cherry".into()), &mut rng)
//!         .unwrap();
//! assert_eq!(outcome.target, 2);
//! ```

pub mod error;
pub mod grover;
pub mod qft;
pub mod shor;

pub use error::{AlgorithmError, Result};
pub use grover::{
    apply_diffusion, apply_oracle, run_database_search, DiffusionSpan, GroverCircuit,
    GroverOutcome, TargetQuery,
};
pub use qft::{inverse_qft, qft};
pub use shor::{complete_factorisation, shor_find_factor, Factorisation};

/// Module version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

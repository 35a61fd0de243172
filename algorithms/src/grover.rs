//! Grover's Search Algorithm
//!
//! Quadratic speedup for unstructured search, in two facets:
//!
//! 1. A circuit builder that prepares the uniform superposition and
//!    appends oracle + diffusion rounds for a target basis state.
//! 2. A direct engine that mutates a state in place and supports
//!    diffusion restricted to a subspace of basis indices, which is
//!    what makes searching a database that occupies only the first D
//!    of 2^n basis states work: averaging over the full register would
//!    drown the database amplitudes in zeros.
//!
//! ## Algorithm
//! 1. Initialise uniform amplitude over the searched space
//! 2. Repeat ⌊π√M/4⌋ times: phase-flip the target, invert about the mean
//! 3. Measure

use crate::{AlgorithmError, Result};
use qsim_circuits::{Circuit, Complex, QuantumState, SimulatorError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, warn};

/// Optimal Grover iteration count for a search space of `size` states:
/// ⌊π·√size/4⌋ with a floor of one iteration.
pub fn optimal_iterations(size: usize) -> usize {
    let optimal = (PI * (size as f64).sqrt() / 4.0) as usize;
    optimal.max(1)
}

// ==================== Circuit facet ====================

/// Builder for a full-register Grover circuit targeting one basis state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroverCircuit {
    /// Register size
    pub num_qubits: usize,
    /// Marked basis state
    pub target: usize,
    /// Iteration override; `None` selects the optimal count
    pub iterations: Option<usize>,
}

impl GroverCircuit {
    pub fn new(num_qubits: usize, target: usize) -> Self {
        Self { num_qubits, target, iterations: None }
    }

    /// Fix the number of Grover iterations explicitly
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Build the full circuit: H-layer preparation followed by
    /// oracle + diffusion rounds. No trailing measurement is added, so
    /// the caller can inspect probabilities or append `add_measure_all`.
    pub fn build(&self) -> Result<Circuit> {
        let mut circuit = Circuit::new(self.num_qubits, "Grover search")?;

        for qubit in 0..self.num_qubits {
            circuit.add_hadamard(qubit)?;
        }

        let iterations = self
            .iterations
            .unwrap_or_else(|| optimal_iterations(1 << self.num_qubits));
        for _ in 0..iterations {
            append_oracle(&mut circuit, self.target)?;
            append_diffusion(&mut circuit)?;
        }

        Ok(circuit)
    }
}

/// Append a phase oracle for `target` to the circuit.
///
/// X gates toggle every qubit that is 0 in the target so that a
/// multi-controlled-Z over all qubits fires exactly on |target⟩, then
/// the toggles are undone.
pub fn append_oracle(circuit: &mut Circuit, target: usize) -> Result<()> {
    let n = circuit.num_qubits;
    if target >= 1 << n {
        return Err(SimulatorError::InvalidStateIndex(target, 1 << n).into());
    }

    for qubit in 0..n {
        if target >> qubit & 1 == 0 {
            circuit.add_pauli_x(qubit)?;
        }
    }

    append_multi_controlled_z(circuit)?;

    for qubit in 0..n {
        if target >> qubit & 1 == 0 {
            circuit.add_pauli_x(qubit)?;
        }
    }

    Ok(())
}

/// Append the diffusion operator (inversion about the mean):
/// H-layer, X-layer, multi-controlled-Z, X-layer, H-layer.
pub fn append_diffusion(circuit: &mut Circuit) -> Result<()> {
    let n = circuit.num_qubits;

    for qubit in 0..n {
        circuit.add_hadamard(qubit)?;
    }
    for qubit in 0..n {
        circuit.add_pauli_x(qubit)?;
    }

    append_multi_controlled_z(circuit)?;

    for qubit in 0..n {
        circuit.add_pauli_x(qubit)?;
    }
    for qubit in 0..n {
        circuit.add_hadamard(qubit)?;
    }

    Ok(())
}

/// Append a multi-controlled-Z over the whole register: a phase flip on
/// |1...1⟩ and nothing else.
///
/// For n ≥ 3 the flip is synthesised from the fixed gate set with the
/// parity-phase decomposition of the AND function: for every non-empty
/// qubit subset S, a CNOT ladder folds the parity of S onto its highest
/// qubit, a phase of (−1)^{|S|+1}·π/2^{n−1} is applied there, and the
/// ladder is undone. Gate count grows as n·2^{n−1}, so large registers
/// exhaust the circuit capacity; the direct engine below is the
/// intended path for those.
fn append_multi_controlled_z(circuit: &mut Circuit) -> Result<()> {
    let n = circuit.num_qubits;
    if n == 1 {
        circuit.add_pauli_z(0)?;
        return Ok(());
    }
    if n == 2 {
        circuit.add_cz(0, 1)?;
        return Ok(());
    }

    let base_angle = PI / (1usize << (n - 1)) as f64;
    for subset in 1usize..1 << n {
        let members: Vec<usize> = (0..n).filter(|k| subset >> k & 1 == 1).collect();
        let Some((&parity_qubit, ladder)) = members.split_last() else {
            continue;
        };
        let angle = if members.len() % 2 == 1 { base_angle } else { -base_angle };

        for &qubit in ladder {
            circuit.add_cnot(qubit, parity_qubit)?;
        }
        circuit.add_phase(parity_qubit, angle)?;
        for &qubit in ladder.iter().rev() {
            circuit.add_cnot(qubit, parity_qubit)?;
        }
    }

    Ok(())
}

// ==================== Direct engine ====================

/// The index set a diffusion step averages over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffusionSpan {
    /// Every basis state of the register
    FullSpace,
    /// Exactly these basis indices; the rest are untouched
    Subspace(Vec<usize>),
}

/// Phase oracle: negate the amplitude of the target basis state.
pub fn apply_oracle(state: &mut QuantumState, target: usize) -> Result<()> {
    if target >= state.num_states() {
        return Err(SimulatorError::InvalidStateIndex(target, state.num_states()).into());
    }
    let amplitude = state.amplitude(target);
    state.set_amplitude(target, -amplitude)?;
    Ok(())
}

/// Inversion about the mean over the given span.
///
/// The average is taken over the span's size; every spanned amplitude
/// a_j becomes 2·avg − a_j. Subspace indices beyond the register are
/// skipped with a warning, as the original guarded them silently.
pub fn apply_diffusion(state: &mut QuantumState, span: &DiffusionSpan) -> Result<()> {
    match span {
        DiffusionSpan::FullSpace => {
            let count = state.num_states();
            let sum: Complex = state.amplitudes().iter().sum();
            let average = sum / count as f64;
            for index in 0..count {
                let amplitude = state.amplitude(index);
                state.set_amplitude(index, 2.0 * average - amplitude)?;
            }
        }
        DiffusionSpan::Subspace(indices) => {
            if indices.is_empty() {
                return Err(AlgorithmError::EmptyDatabase);
            }
            let mut sum = Complex::new(0.0, 0.0);
            for &index in indices {
                if index < state.num_states() {
                    sum += state.amplitude(index);
                } else {
                    warn!(index, "diffusion span index beyond register; skipped");
                }
            }
            let average = sum / indices.len() as f64;
            for &index in indices {
                if index < state.num_states() {
                    let amplitude = state.amplitude(index);
                    state.set_amplitude(index, 2.0 * average - amplitude)?;
                }
            }
        }
    }
    Ok(())
}

// ==================== Database search ====================

/// How the caller designates the searched item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetQuery {
    /// Item position in the database
    Index(usize),
    /// Item label; exact match first, then case-insensitive substring
    Name(String),
    /// Uniform random choice
    Random,
}

/// Resolve a query against the database labels.
///
/// An out-of-range index or an unmatched name falls back to a uniform
/// random target.
pub fn resolve_target<S: AsRef<str>>(
    database: &[S],
    query: &TargetQuery,
    rng: &mut impl Rng,
) -> Result<usize> {
    if database.is_empty() {
        return Err(AlgorithmError::EmptyDatabase);
    }

    let target = match query {
        TargetQuery::Index(index) if *index < database.len() => *index,
        TargetQuery::Index(index) => {
            warn!(index, size = database.len(), "index outside database; choosing randomly");
            rng.gen_range(0..database.len())
        }
        TargetQuery::Name(name) => {
            let needle = name.to_lowercase();
            let exact = database
                .iter()
                .position(|item| item.as_ref().eq_ignore_ascii_case(name));
            let partial = database
                .iter()
                .position(|item| item.as_ref().to_lowercase().contains(&needle));
            match exact.or(partial) {
                Some(index) => index,
                None => {
                    warn!(name = %name, "no database item matches; choosing randomly");
                    rng.gen_range(0..database.len())
                }
            }
        }
        TargetQuery::Random => rng.gen_range(0..database.len()),
    };

    Ok(target)
}

/// Result of one database search run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroverOutcome {
    /// Resolved target index
    pub target: usize,
    /// Grover iterations applied
    pub iterations: usize,
    /// Final probability per database item
    pub probabilities: Vec<f64>,
    /// Index sampled from the database-restricted distribution
    pub measured: usize,
}

impl GroverOutcome {
    /// Final probability of the target item
    pub fn target_probability(&self) -> f64 {
        self.probabilities.get(self.target).copied().unwrap_or(0.0)
    }

    /// Whether the sampled measurement hit the target
    pub fn found_target(&self) -> bool {
        self.measured == self.target
    }
}

/// Run Grover search over a database occupying the first D basis states.
///
/// The state is initialised to uniform amplitude 1/√D over [0, D) with
/// every other amplitude zero, then oracle + subspace diffusion are
/// applied ⌊π√D/4⌋ times. The measurement at the end samples by
/// inverse CDF from the probability mass restricted to the database; it
/// does not collapse the state, so the caller can still inspect it.
pub fn run_database_search<S: AsRef<str>>(
    state: &mut QuantumState,
    database: &[S],
    query: &TargetQuery,
    rng: &mut impl Rng,
) -> Result<GroverOutcome> {
    let size = database.len();
    if size == 0 {
        return Err(AlgorithmError::EmptyDatabase);
    }
    if size > state.num_states() {
        return Err(AlgorithmError::DatabaseTooLarge(size, state.num_qubits()));
    }

    let target = resolve_target(database, query, rng)?;

    state.initialise_zero();
    let amplitude = Complex::new(1.0 / (size as f64).sqrt(), 0.0);
    for index in 0..size {
        state.set_amplitude(index, amplitude)?;
    }

    let iterations = optimal_iterations(size);
    let span = DiffusionSpan::Subspace((0..size).collect());

    for iteration in 0..iterations {
        apply_oracle(state, target)?;
        apply_diffusion(state, &span)?;
        debug!(
            iteration = iteration + 1,
            target_probability = state.probability(target),
            "grover iteration"
        );
    }

    let probabilities: Vec<f64> = (0..size).map(|index| state.probability(index)).collect();

    let total: f64 = probabilities.iter().sum();
    let u: f64 = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    let mut measured = size - 1;
    for (index, &p) in probabilities.iter().enumerate() {
        cumulative += p;
        if u <= cumulative {
            measured = index;
            break;
        }
    }

    Ok(GroverOutcome { target, iterations, probabilities, measured })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qsim_circuits::state::NORM_TOLERANCE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DATABASE: [&str; 8] = [
        "apple", "banana", "cherry", "date", "elderberry", "fig", "grape", "honeydew",
    ];

    #[test]
    fn test_optimal_iterations() {
        assert_eq!(optimal_iterations(1), 1);
        assert_eq!(optimal_iterations(4), 1);
        assert_eq!(optimal_iterations(8), 2);
        assert_eq!(optimal_iterations(1 << 10), 25);
    }

    #[test]
    fn test_oracle_circuit_marks_only_target() {
        for target in [0usize, 3, 5, 7] {
            let mut circuit = Circuit::new(3, "oracle").unwrap();
            append_oracle(&mut circuit, target).unwrap();

            let mut state = QuantumState::new(3).unwrap();
            state.initialise_equal_superposition();
            let mut rng = StdRng::seed_from_u64(0);
            circuit.execute(&mut state, &mut rng).unwrap();

            let uniform = 1.0 / 8.0f64.sqrt();
            for index in 0..8 {
                let expected = if index == target { -uniform } else { uniform };
                assert!(
                    (state.amplitude(index).re - expected).abs() < 1e-9
                        && state.amplitude(index).im.abs() < 1e-9,
                    "target {target}, index {index}: got {}",
                    state.amplitude(index)
                );
            }
        }
    }

    #[test]
    fn test_full_space_circuit_two_qubits_is_exact() {
        // N = 4, M = 1: one iteration amplifies the target to certainty
        let circuit = GroverCircuit::new(2, 0b10).build().unwrap();
        let mut state = QuantumState::zero_state(2).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        circuit.execute(&mut state, &mut rng).unwrap();

        assert_relative_eq!(state.probability(0b10), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_full_space_circuit_three_qubits() {
        let circuit = GroverCircuit::new(3, 5).build().unwrap();
        let mut state = QuantumState::zero_state(3).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        circuit.execute(&mut state, &mut rng).unwrap();

        assert!(state.is_normalised(NORM_TOLERANCE));
        assert!(
            state.probability(5) >= 0.78,
            "target probability {} below threshold",
            state.probability(5)
        );
    }

    #[test]
    fn test_direct_oracle_negates_target() {
        let mut state = QuantumState::new(3).unwrap();
        state.initialise_equal_superposition();
        apply_oracle(&mut state, 6).unwrap();

        let uniform = 1.0 / 8.0f64.sqrt();
        assert_relative_eq!(state.amplitude(6).re, -uniform, epsilon = 1e-12);
        assert_relative_eq!(state.amplitude(0).re, uniform, epsilon = 1e-12);

        assert!(apply_oracle(&mut state, 8).is_err());
    }

    #[test]
    fn test_full_space_diffusion_fixes_uniform_state() {
        let mut state = QuantumState::new(2).unwrap();
        state.initialise_equal_superposition();
        apply_diffusion(&mut state, &DiffusionSpan::FullSpace).unwrap();

        for index in 0..4 {
            assert_relative_eq!(state.probability(index), 0.25, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_direct_engine_full_space_search() {
        // same math as the circuit facet, without any circuit
        let mut state = QuantumState::new(3).unwrap();
        state.initialise_equal_superposition();

        for _ in 0..optimal_iterations(8) {
            apply_oracle(&mut state, 5).unwrap();
            apply_diffusion(&mut state, &DiffusionSpan::FullSpace).unwrap();
        }

        assert!(state.probability(5) >= 0.78);
    }

    #[test]
    fn test_subspace_search_leaves_rest_zero() {
        // 8-item database inside a 32-state register
        let mut state = QuantumState::new(5).unwrap();
        let mut rng = StdRng::seed_from_u64(97);
        let outcome =
            run_database_search(&mut state, &DATABASE, &TargetQuery::Index(3), &mut rng).unwrap();

        assert_eq!(outcome.target, 3);
        assert_eq!(outcome.iterations, 2);
        assert!(
            outcome.probabilities[3] >= 0.78,
            "target probability {} below threshold",
            outcome.probabilities[3]
        );
        for index in 8..32 {
            assert_eq!(state.probability(index), 0.0);
        }
        assert!(outcome.measured < 8);
    }

    #[test]
    fn test_subspace_beats_full_diffusion_for_sparse_database() {
        // full-space diffusion over a mostly-zero register collapses the
        // amplification that subspace diffusion preserves
        let mut sparse = QuantumState::new(5).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let outcome =
            run_database_search(&mut sparse, &DATABASE, &TargetQuery::Index(0), &mut rng).unwrap();

        let mut full = QuantumState::new(5).unwrap();
        full.initialise_zero();
        let amplitude = Complex::new(1.0 / 8.0f64.sqrt(), 0.0);
        for index in 0..8 {
            full.set_amplitude(index, amplitude).unwrap();
        }
        for _ in 0..2 {
            apply_oracle(&mut full, 0).unwrap();
            apply_diffusion(&mut full, &DiffusionSpan::FullSpace).unwrap();
        }

        assert!(outcome.probabilities[0] > full.probability(0));
    }

    #[test]
    fn test_resolve_target_by_index_and_name() {
        let mut rng = StdRng::seed_from_u64(0);

        let index = resolve_target(&DATABASE, &TargetQuery::Index(4), &mut rng).unwrap();
        assert_eq!(index, 4);

        let exact =
            resolve_target(&DATABASE, &TargetQuery::Name("Cherry".into()), &mut rng).unwrap();
        assert_eq!(exact, 2);

        let partial =
            resolve_target(&DATABASE, &TargetQuery::Name("berr".into()), &mut rng).unwrap();
        assert_eq!(partial, 4); // elderberry is the first substring match
    }

    #[test]
    fn test_resolve_target_fallbacks() {
        let mut rng = StdRng::seed_from_u64(5);

        let from_bad_index =
            resolve_target(&DATABASE, &TargetQuery::Index(99), &mut rng).unwrap();
        assert!(from_bad_index < DATABASE.len());

        let from_bad_name =
            resolve_target(&DATABASE, &TargetQuery::Name("durian".into()), &mut rng).unwrap();
        assert!(from_bad_name < DATABASE.len());

        let empty: [&str; 0] = [];
        assert_eq!(
            resolve_target(&empty, &TargetQuery::Random, &mut rng),
            Err(AlgorithmError::EmptyDatabase)
        );
    }

    #[test]
    fn test_database_too_large() {
        let mut state = QuantumState::new(2).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            run_database_search(&mut state, &DATABASE, &TargetQuery::Random, &mut rng)
                .unwrap_err(),
            AlgorithmError::DatabaseTooLarge(8, 2)
        );
    }
}

//! Quantum state - dense amplitude vector over the computational basis
//!
//! A [`QuantumState`] owns the full vector of 2^n complex amplitudes for
//! an n-qubit register. Gate kernels (see [`crate::gates`]) mutate it in
//! place; the measurement routines collapse it.

use crate::{Complex, Result, SimulatorError, MAX_QUBITS, ONE, ZERO};
use rand::Rng;
use tracing::warn;

/// Recommended tolerance for normalisation checks
pub const NORM_TOLERANCE: f64 = 1e-9;

/// Below this norm a state is considered degenerate and is left untouched
pub const DEGENERATE_NORM: f64 = 1e-10;

/// State vector of an n-qubit register
///
/// Basis state `i` carries qubit `k` as bit `k` of `i` (little-endian on
/// qubit number). The amplitude buffer always holds exactly `2^n`
/// entries; `num_qubits` is fixed for the lifetime of the state.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumState {
    num_qubits: usize,
    amplitudes: Vec<Complex>,
}

impl QuantumState {
    /// Create an n-qubit state with all amplitudes zero.
    ///
    /// Callers normally follow up with one of the initialisers. Fails
    /// when `num_qubits` is outside `[1, MAX_QUBITS]` or the amplitude
    /// buffer cannot be allocated.
    pub fn new(num_qubits: usize) -> Result<Self> {
        if num_qubits < 1 || num_qubits > MAX_QUBITS {
            return Err(SimulatorError::InvalidQubitCount(num_qubits));
        }
        let dim = 1usize << num_qubits;
        let mut amplitudes = Vec::new();
        amplitudes
            .try_reserve_exact(dim)
            .map_err(|_| SimulatorError::AllocationFailed(dim))?;
        amplitudes.resize(dim, ZERO);
        Ok(Self { num_qubits, amplitudes })
    }

    /// Create an n-qubit state initialised to |0...0⟩.
    pub fn zero_state(num_qubits: usize) -> Result<Self> {
        let mut state = Self::new(num_qubits)?;
        state.initialise_zero();
        Ok(state)
    }

    /// Number of qubits in the register
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of basis states (2^n)
    pub fn num_states(&self) -> usize {
        self.amplitudes.len()
    }

    /// Amplitude of basis state `index`, zero when out of range
    pub fn amplitude(&self, index: usize) -> Complex {
        self.amplitudes.get(index).copied().unwrap_or(ZERO)
    }

    /// All amplitudes in basis-index order
    pub fn amplitudes(&self) -> &[Complex] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex] {
        &mut self.amplitudes
    }

    /// Reset to the basis state |0...0⟩
    pub fn initialise_zero(&mut self) {
        self.amplitudes.fill(ZERO);
        self.amplitudes[0] = ONE;
    }

    /// Set every amplitude to 1/sqrt(2^n)
    pub fn initialise_equal_superposition(&mut self) {
        let amp = Complex::new(1.0 / (self.num_states() as f64).sqrt(), 0.0);
        self.amplitudes.fill(amp);
    }

    /// Overwrite a single amplitude.
    ///
    /// The caller is responsible for renormalising afterwards if the
    /// overall norm changed.
    pub fn set_amplitude(&mut self, index: usize, amplitude: Complex) -> Result<()> {
        let dim = self.num_states();
        if index >= dim {
            return Err(SimulatorError::InvalidStateIndex(index, dim));
        }
        self.amplitudes[index] = amplitude;
        Ok(())
    }

    /// Sum of |a_i|² over all basis states
    pub fn norm_squared(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Divide every amplitude by the current norm.
    ///
    /// A norm below [`DEGENERATE_NORM`] leaves the state untouched and
    /// returns [`SimulatorError::DegenerateNorm`]; callers treat that as
    /// a warning, not a failure.
    pub fn normalise(&mut self) -> Result<()> {
        let norm = self.norm_squared().sqrt();
        if norm < DEGENERATE_NORM {
            warn!(norm, "cannot normalise near-zero state");
            return Err(SimulatorError::DegenerateNorm(norm));
        }
        for amp in &mut self.amplitudes {
            *amp /= norm;
        }
        Ok(())
    }

    /// Probability |a_i|² of basis state `index`, zero when out of range
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitudes.get(index).map(|a| a.norm_sqr()).unwrap_or(0.0)
    }

    /// Probability distribution over all basis states
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// True iff |Σ|a_i|² − 1| < tolerance
    pub fn is_normalised(&self, tolerance: f64) -> bool {
        (self.norm_squared() - 1.0).abs() < tolerance
    }

    /// Measure the full register, collapsing to a single basis state.
    ///
    /// Draws u ∈ [0, 1) and collapses to the smallest index whose
    /// cumulative probability first reaches u. Returns the measured
    /// basis index. On a valid normalised state the fallback branch
    /// (collapse to the last index) is unreachable in practice.
    pub fn measure_all(&mut self, rng: &mut impl Rng) -> usize {
        let u: f64 = rng.gen();
        let mut cumulative = 0.0;

        for i in 0..self.num_states() {
            cumulative += self.probability(i);
            if u <= cumulative {
                self.collapse_to(i);
                return i;
            }
        }

        let last = self.num_states() - 1;
        self.collapse_to(last);
        last
    }

    /// Measure a single qubit, collapsing the register onto the outcome.
    ///
    /// Returns 0 or 1. Amplitudes inconsistent with the outcome are
    /// zeroed; the survivors are divided by √p so the state stays
    /// normalised. When the outcome probability is degenerate the
    /// renormalisation is skipped and the outcome still returned.
    pub fn measure_qubit(&mut self, qubit: usize, rng: &mut impl Rng) -> Result<u8> {
        if qubit >= self.num_qubits {
            return Err(SimulatorError::InvalidQubitIndex(qubit, self.num_qubits));
        }

        let mask = 1usize << qubit;
        let prob_zero: f64 = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask == 0)
            .map(|(_, a)| a.norm_sqr())
            .sum();

        let u: f64 = rng.gen();
        let outcome: u8 = if u < prob_zero { 0 } else { 1 };

        let prob_outcome = if outcome == 0 { prob_zero } else { 1.0 - prob_zero };
        let norm = prob_outcome.sqrt();

        if norm < DEGENERATE_NORM {
            warn!(qubit, outcome, "measured qubit with near-zero probability; skipping renormalisation");
            return Ok(outcome);
        }

        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            let bit = ((i & mask) != 0) as u8;
            if bit != outcome {
                *amp = ZERO;
            } else {
                *amp /= norm;
            }
        }

        Ok(outcome)
    }

    fn collapse_to(&mut self, index: usize) {
        self.amplitudes.fill(ZERO);
        self.amplitudes[index] = ONE;
    }
}

/// Render a basis index as a bit string, qubit n−1 first.
///
/// `format_basis_state(5, 4)` yields `"0101"`.
pub fn format_basis_state(index: usize, width: usize) -> String {
    (0..width)
        .rev()
        .map(|k| if (index >> k) & 1 == 1 { '1' } else { '0' })
        .collect()
}

impl std::fmt::Display for QuantumState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let terms: Vec<String> = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(_, a)| a.norm_sqr() > 1e-10)
            .map(|(i, a)| {
                format!("({:.4})|{}⟩", a, format_basis_state(i, self.num_qubits))
            })
            .collect();
        write!(f, "{}", terms.join(" + "))
    }
}

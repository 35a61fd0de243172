//! Quantum Fourier Transform (QFT)
//!
//! Simplified QFT over the full register, applied directly through the
//! gate kernels: Hadamard plus a cascade of controlled phases, then a
//! bit-reversal swap layer.
//!
//! ## Transform
//! |j⟩ → (1/√N) Σₖ exp(2πijk/N) |k⟩

use crate::Result;
use qsim_circuits::QuantumState;
use std::f64::consts::PI;

/// Apply the QFT to the whole register in place.
pub fn qft(state: &mut QuantumState) -> Result<()> {
    let n = state.num_qubits();

    for k in 0..n {
        state.h(k)?;
        for j in (k + 1)..n {
            let angle = PI / (1usize << (j - k)) as f64;
            state.controlled_phase(j, k, angle)?;
        }
    }

    for i in 0..n / 2 {
        state.swap(i, n - 1 - i)?;
    }

    Ok(())
}

/// Apply the inverse QFT: the conjugate-transpose sequence of [`qft`],
/// with swaps first and the phase cascade reversed with negated angles.
pub fn inverse_qft(state: &mut QuantumState) -> Result<()> {
    let n = state.num_qubits();

    for i in 0..n / 2 {
        state.swap(i, n - 1 - i)?;
    }

    for k in (0..n).rev() {
        for j in ((k + 1)..n).rev() {
            let angle = -PI / (1usize << (j - k)) as f64;
            state.controlled_phase(j, k, angle)?;
        }
        state.h(k)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qsim_circuits::state::NORM_TOLERANCE;

    fn assert_states_close(a: &QuantumState, b: &QuantumState, epsilon: f64) {
        for i in 0..a.num_states() {
            assert!(
                (a.amplitude(i) - b.amplitude(i)).norm() < epsilon,
                "amplitude {} differs: {} vs {}",
                i,
                a.amplitude(i),
                b.amplitude(i)
            );
        }
    }

    #[test]
    fn test_qft_of_zero_is_uniform() {
        let mut state = QuantumState::zero_state(3).unwrap();
        qft(&mut state).unwrap();
        for i in 0..8 {
            assert_relative_eq!(state.probability(i), 0.125, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_qft_single_qubit_is_hadamard() {
        let mut state = QuantumState::zero_state(1).unwrap();
        qft(&mut state).unwrap();

        let mut expected = QuantumState::zero_state(1).unwrap();
        expected.h(0).unwrap();
        assert_states_close(&state, &expected, 1e-12);
    }

    #[test]
    fn test_round_trip_small_registers() {
        for n in 1..=6 {
            let mut state = QuantumState::zero_state(n).unwrap();
            // a state with nontrivial structure on every qubit
            state.h(0).unwrap();
            if n > 1 {
                state.x(1).unwrap();
                state.cnot(0, n - 1).unwrap();
            }
            for q in 0..n {
                state.rz(q, 0.37 * (q + 1) as f64).unwrap();
            }
            let reference = state.clone();

            qft(&mut state).unwrap();
            assert!(state.is_normalised(NORM_TOLERANCE));
            inverse_qft(&mut state).unwrap();

            assert_states_close(&state, &reference, 1e-9);
        }
    }

    #[test]
    fn test_qft_of_basis_state_is_uniform_with_phases() {
        // QFT|01⟩ over 2 qubits: amplitudes (1, 1, −1, −1)/2 under this
        // construction's qubit-ordering convention
        let mut state = QuantumState::zero_state(2).unwrap();
        state.x(0).unwrap();
        qft(&mut state).unwrap();

        let expected = [0.5, 0.5, -0.5, -0.5];
        for (i, &re) in expected.iter().enumerate() {
            assert!(
                (state.amplitude(i) - qsim_circuits::Complex::new(re, 0.0)).norm() < 1e-9,
                "index {}: got {}",
                i,
                state.amplitude(i)
            );
        }
    }
}

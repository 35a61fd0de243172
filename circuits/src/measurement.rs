//! Sampling statistics - repeated measurement without collapse
//!
//! Useful for histograms and for checking that measurement outcomes
//! track the state's probability distribution.

use crate::QuantumState;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Outcome counts from repeated sampling of one state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleStatistics {
    /// Number of draws
    pub shots: usize,
    /// Occurrences per basis index
    pub counts: HashMap<usize, usize>,
}

impl SampleStatistics {
    /// Observed frequency of a basis index
    pub fn frequency(&self, index: usize) -> f64 {
        *self.counts.get(&index).unwrap_or(&0) as f64 / self.shots as f64
    }

    /// Observed frequencies per outcome
    pub fn frequencies(&self) -> HashMap<usize, f64> {
        self.counts
            .iter()
            .map(|(&index, &count)| (index, count as f64 / self.shots as f64))
            .collect()
    }

    /// Outcome with the highest count
    pub fn most_frequent(&self) -> Option<(usize, usize)> {
        self.counts
            .iter()
            .max_by_key(|(_, &count)| count)
            .map(|(&index, &count)| (index, count))
    }
}

/// Draw `shots` full-register samples without collapsing the state.
///
/// Each draw walks the cumulative distribution exactly like
/// [`QuantumState::measure_all`], but on the unchanged state.
pub fn sample_counts(
    state: &QuantumState,
    shots: usize,
    rng: &mut impl Rng,
) -> SampleStatistics {
    let probabilities = state.probabilities();
    let mut counts: HashMap<usize, usize> = HashMap::new();

    for _ in 0..shots {
        let u: f64 = rng.gen();
        let mut cumulative = 0.0;
        let mut outcome = probabilities.len() - 1;

        for (i, &p) in probabilities.iter().enumerate() {
            cumulative += p;
            if u <= cumulative {
                outcome = i;
                break;
            }
        }
        *counts.entry(outcome).or_insert(0) += 1;
    }

    SampleStatistics { shots, counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SHOTS: usize = 10_000;

    // 99% confidence half-width for a binomial proportion at 10^4 draws
    fn tolerance(p: f64) -> f64 {
        2.576 * (p * (1.0 - p) / SHOTS as f64).sqrt() + 0.005
    }

    #[test]
    fn test_sampling_matches_probabilities() {
        let mut rng = StdRng::seed_from_u64(19);
        let mut state = QuantumState::zero_state(2).unwrap();
        state.ry(0, 1.0).unwrap();
        state.ry(1, 2.2).unwrap();

        let stats = sample_counts(&state, SHOTS, &mut rng);
        assert_eq!(stats.shots, SHOTS);

        for i in 0..4 {
            let p = state.probability(i);
            assert!(
                (stats.frequency(i) - p).abs() < tolerance(p),
                "index {}: frequency {} vs probability {}",
                i,
                stats.frequency(i),
                p
            );
        }
    }

    #[test]
    fn test_sampling_does_not_collapse() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut state = QuantumState::zero_state(1).unwrap();
        state.h(0).unwrap();

        sample_counts(&state, 100, &mut rng);
        assert!((state.probability(0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_most_frequent_on_skewed_state() {
        let mut rng = StdRng::seed_from_u64(31);
        let mut state = QuantumState::zero_state(2).unwrap();
        state.ry(0, 0.4).unwrap(); // heavily favours |00⟩

        let stats = sample_counts(&state, SHOTS, &mut rng);
        let (index, _) = stats.most_frequent().unwrap();
        assert_eq!(index, 0);
    }

    /// `measure_all` and qubit-by-qubit `measure_qubit(0..n)` must agree
    /// in distribution on any state.
    #[test]
    fn test_measure_all_matches_per_qubit_measurement() {
        let mut prepared = QuantumState::zero_state(2).unwrap();
        prepared.ry(0, 1.1).unwrap();
        prepared.ry(1, 2.0).unwrap();
        prepared.cnot(0, 1).unwrap();

        let mut rng = StdRng::seed_from_u64(37);
        let mut counts_all = [0usize; 4];
        let mut counts_per_qubit = [0usize; 4];

        for _ in 0..SHOTS {
            let mut copy = prepared.clone();
            counts_all[copy.measure_all(&mut rng)] += 1;

            let mut copy = prepared.clone();
            let mut outcome = 0usize;
            for qubit in 0..2 {
                let bit = copy.measure_qubit(qubit, &mut rng).unwrap();
                outcome |= (bit as usize) << qubit;
            }
            counts_per_qubit[outcome] += 1;
        }

        for i in 0..4 {
            let f_all = counts_all[i] as f64 / SHOTS as f64;
            let f_per = counts_per_qubit[i] as f64 / SHOTS as f64;
            let p = prepared.probability(i);
            assert!(
                (f_all - p).abs() < tolerance(p),
                "measure_all drifted from probability at index {i}"
            );
            assert!(
                (f_per - p).abs() < tolerance(p),
                "per-qubit measurement drifted from probability at index {i}"
            );
        }
    }
}

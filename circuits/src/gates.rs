//! Gate kernels - in-place unitary transformations of a state vector
//!
//! Every kernel validates its qubit indices and then iterates over the
//! pairs of basis indices that differ only in the bit(s) of interest.
//! No kernel allocates; a validation failure returns an error and
//! leaves the state untouched.

use crate::{Complex, QuantumState, Result, SimulatorError, FRAC_1_SQRT_2};

impl QuantumState {
    fn check_qubit(&self, qubit: usize) -> Result<()> {
        if qubit >= self.num_qubits() {
            return Err(SimulatorError::InvalidQubitIndex(qubit, self.num_qubits()));
        }
        Ok(())
    }

    fn check_qubit_pair(&self, qubit1: usize, qubit2: usize) -> Result<()> {
        self.check_qubit(qubit1)?;
        self.check_qubit(qubit2)?;
        if qubit1 == qubit2 {
            return Err(SimulatorError::SameQubitIndex(qubit1, qubit2));
        }
        Ok(())
    }

    /// Pauli-X (bit flip): swap the amplitudes of each pair
    pub fn x(&mut self, qubit: usize) -> Result<()> {
        self.check_qubit(qubit)?;
        let mask = 1usize << qubit;
        let amps = self.amplitudes_mut();
        for i in 0..amps.len() {
            if i & mask == 0 {
                amps.swap(i, i | mask);
            }
        }
        Ok(())
    }

    /// Pauli-Y: a_i ← −i·a_j, a_j ← i·a_i on each pair
    pub fn y(&mut self, qubit: usize) -> Result<()> {
        self.check_qubit(qubit)?;
        let mask = 1usize << qubit;
        let i_unit = Complex::new(0.0, 1.0);
        let neg_i_unit = Complex::new(0.0, -1.0);
        let amps = self.amplitudes_mut();
        for i in 0..amps.len() {
            if i & mask == 0 {
                let j = i | mask;
                let amp0 = amps[i];
                let amp1 = amps[j];
                amps[i] = neg_i_unit * amp1;
                amps[j] = i_unit * amp0;
            }
        }
        Ok(())
    }

    /// Pauli-Z (phase flip): negate amplitudes where the qubit is 1
    pub fn z(&mut self, qubit: usize) -> Result<()> {
        self.check_qubit(qubit)?;
        let mask = 1usize << qubit;
        let amps = self.amplitudes_mut();
        for i in 0..amps.len() {
            if i & mask != 0 {
                amps[i] = -amps[i];
            }
        }
        Ok(())
    }

    /// Hadamard: (a_i ± a_j)/√2 from the pre-gate pair values
    pub fn h(&mut self, qubit: usize) -> Result<()> {
        self.check_qubit(qubit)?;
        let mask = 1usize << qubit;
        let factor = FRAC_1_SQRT_2;
        let amps = self.amplitudes_mut();
        for i in 0..amps.len() {
            if i & mask == 0 {
                let j = i | mask;
                let amp0 = amps[i];
                let amp1 = amps[j];
                amps[i] = (amp0 + amp1) * factor;
                amps[j] = (amp0 - amp1) * factor;
            }
        }
        Ok(())
    }

    /// Phase gate: multiply amplitudes with the qubit at 1 by e^{iφ}
    pub fn phase(&mut self, qubit: usize, phi: f64) -> Result<()> {
        self.check_qubit(qubit)?;
        let mask = 1usize << qubit;
        let factor = Complex::from_polar(1.0, phi);
        let amps = self.amplitudes_mut();
        for i in 0..amps.len() {
            if i & mask != 0 {
                amps[i] *= factor;
            }
        }
        Ok(())
    }

    /// Rotation around the X axis by `theta`
    pub fn rx(&mut self, qubit: usize, theta: f64) -> Result<()> {
        self.check_qubit(qubit)?;
        let mask = 1usize << qubit;
        let cos_half = Complex::new((theta / 2.0).cos(), 0.0);
        let neg_i_sin = Complex::new(0.0, -(theta / 2.0).sin());
        let amps = self.amplitudes_mut();
        for i in 0..amps.len() {
            if i & mask == 0 {
                let j = i | mask;
                let amp0 = amps[i];
                let amp1 = amps[j];
                amps[i] = cos_half * amp0 + neg_i_sin * amp1;
                amps[j] = neg_i_sin * amp0 + cos_half * amp1;
            }
        }
        Ok(())
    }

    /// Rotation around the Y axis by `theta`
    pub fn ry(&mut self, qubit: usize, theta: f64) -> Result<()> {
        self.check_qubit(qubit)?;
        let mask = 1usize << qubit;
        let cos_half = (theta / 2.0).cos();
        let sin_half = (theta / 2.0).sin();
        let amps = self.amplitudes_mut();
        for i in 0..amps.len() {
            if i & mask == 0 {
                let j = i | mask;
                let amp0 = amps[i];
                let amp1 = amps[j];
                amps[i] = amp0 * cos_half - amp1 * sin_half;
                amps[j] = amp0 * sin_half + amp1 * cos_half;
            }
        }
        Ok(())
    }

    /// Rotation around the Z axis by `theta`
    pub fn rz(&mut self, qubit: usize, theta: f64) -> Result<()> {
        self.check_qubit(qubit)?;
        let mask = 1usize << qubit;
        let phase_0 = Complex::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex::from_polar(1.0, theta / 2.0);
        let amps = self.amplitudes_mut();
        for (i, amp) in amps.iter_mut().enumerate() {
            *amp *= if i & mask != 0 { phase_1 } else { phase_0 };
        }
        Ok(())
    }

    /// Controlled-NOT: flip `target` where `control` is 1
    pub fn cnot(&mut self, control: usize, target: usize) -> Result<()> {
        self.check_qubit_pair(control, target)?;
        let control_mask = 1usize << control;
        let target_mask = 1usize << target;
        let amps = self.amplitudes_mut();
        for i in 0..amps.len() {
            if i & control_mask != 0 {
                let partner = i ^ target_mask;
                // each pair appears twice in the scan; swap once
                if partner > i {
                    amps.swap(i, partner);
                }
            }
        }
        Ok(())
    }

    /// Controlled-Z: negate amplitudes where both qubits are 1
    pub fn cz(&mut self, control: usize, target: usize) -> Result<()> {
        self.check_qubit_pair(control, target)?;
        let control_mask = 1usize << control;
        let target_mask = 1usize << target;
        let amps = self.amplitudes_mut();
        for i in 0..amps.len() {
            if i & control_mask != 0 && i & target_mask != 0 {
                amps[i] = -amps[i];
            }
        }
        Ok(())
    }

    /// SWAP: exchange the two qubits' bit values
    pub fn swap(&mut self, qubit1: usize, qubit2: usize) -> Result<()> {
        self.check_qubit_pair(qubit1, qubit2)?;
        let mask1 = 1usize << qubit1;
        let mask2 = 1usize << qubit2;
        let amps = self.amplitudes_mut();
        for i in 0..amps.len() {
            if (i & mask1 != 0) != (i & mask2 != 0) {
                let j = i ^ mask1 ^ mask2;
                if j > i {
                    amps.swap(i, j);
                }
            }
        }
        Ok(())
    }

    /// Controlled-phase: multiply amplitudes with both qubits at 1 by e^{iφ}
    pub fn controlled_phase(&mut self, control: usize, target: usize, phi: f64) -> Result<()> {
        self.check_qubit_pair(control, target)?;
        let control_mask = 1usize << control;
        let target_mask = 1usize << target;
        let factor = Complex::from_polar(1.0, phi);
        let amps = self.amplitudes_mut();
        for i in 0..amps.len() {
            if i & control_mask != 0 && i & target_mask != 0 {
                amps[i] *= factor;
            }
        }
        Ok(())
    }

    /// Identity: validates and does nothing
    pub fn identity(&mut self, qubit: usize) -> Result<()> {
        self.check_qubit(qubit)
    }
}

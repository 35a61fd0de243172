//! Quantum circuit - bounded gate list and interpreter
//!
//! A [`Circuit`] is an ordered list of [`GateOp`] descriptors, capped at
//! [`MAX_GATES`](crate::MAX_GATES). Adders validate their targets before
//! storing anything; `execute` replays the list against a state with a
//! matching qubit count, dispatching to the kernels in insertion order.

use crate::{QuantumState, Result, SimulatorError, MAX_GATES, MAX_QUBITS};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

/// A single gate descriptor.
///
/// Each variant carries exactly the operands its kernel needs: target
/// qubit(s) and, for the parameterised gates, an angle in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GateOp {
    PauliX(usize),
    PauliY(usize),
    PauliZ(usize),
    Hadamard(usize),
    /// Phase gate with angle φ
    Phase(usize, f64),
    RotX(usize, f64),
    RotY(usize, f64),
    RotZ(usize, f64),
    /// (control, target)
    Cnot(usize, usize),
    /// (control, target)
    Cz(usize, usize),
    Swap(usize, usize),
    /// Projective measurement of one qubit
    Measure(usize),
    /// Projective measurement of the full register
    MeasureAll,
}

impl GateOp {
    /// Short mnemonic used when printing circuits
    pub fn label(&self) -> &'static str {
        match self {
            GateOp::PauliX(_) => "X",
            GateOp::PauliY(_) => "Y",
            GateOp::PauliZ(_) => "Z",
            GateOp::Hadamard(_) => "H",
            GateOp::Phase(_, _) => "P",
            GateOp::RotX(_, _) => "RX",
            GateOp::RotY(_, _) => "RY",
            GateOp::RotZ(_, _) => "RZ",
            GateOp::Cnot(_, _) => "CNOT",
            GateOp::Cz(_, _) => "CZ",
            GateOp::Swap(_, _) => "SWAP",
            GateOp::Measure(_) => "M",
            GateOp::MeasureAll => "M_ALL",
        }
    }

    /// Qubit operands in declaration order
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            GateOp::PauliX(q)
            | GateOp::PauliY(q)
            | GateOp::PauliZ(q)
            | GateOp::Hadamard(q)
            | GateOp::Phase(q, _)
            | GateOp::RotX(q, _)
            | GateOp::RotY(q, _)
            | GateOp::RotZ(q, _)
            | GateOp::Measure(q) => vec![q],
            GateOp::Cnot(c, t) | GateOp::Cz(c, t) | GateOp::Swap(c, t) => vec![c, t],
            GateOp::MeasureAll => Vec::new(),
        }
    }

    /// Angle parameter, if the gate has one
    pub fn parameter(&self) -> Option<f64> {
        match *self {
            GateOp::Phase(_, p) | GateOp::RotX(_, p) | GateOp::RotY(_, p) | GateOp::RotZ(_, p) => {
                Some(p)
            }
            _ => None,
        }
    }

    fn validate(&self, num_qubits: usize) -> Result<()> {
        for q in self.qubits() {
            if q >= num_qubits {
                return Err(SimulatorError::InvalidQubitIndex(q, num_qubits));
            }
        }
        if let GateOp::Cnot(c, t) | GateOp::Cz(c, t) | GateOp::Swap(c, t) = *self {
            if c == t {
                return Err(SimulatorError::SameQubitIndex(c, t));
            }
        }
        Ok(())
    }
}

/// An ordered, bounded sequence of gate descriptors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of qubits the circuit addresses
    pub num_qubits: usize,
    /// Human-readable description
    pub description: String,
    gates: Vec<GateOp>,
}

impl Circuit {
    /// Create an empty circuit for `num_qubits` qubits
    pub fn new(num_qubits: usize, description: &str) -> Result<Self> {
        if num_qubits < 1 || num_qubits > MAX_QUBITS {
            return Err(SimulatorError::InvalidQubitCount(num_qubits));
        }
        Ok(Self {
            num_qubits,
            description: description.to_string(),
            gates: Vec::new(),
        })
    }

    /// Gates in insertion order
    pub fn gates(&self) -> &[GateOp] {
        &self.gates
    }

    /// Number of stored gates
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// Validate and append a gate descriptor.
    ///
    /// On any failure the circuit is unchanged.
    pub fn add_gate(&mut self, op: GateOp) -> Result<&mut Self> {
        if self.gates.len() >= MAX_GATES {
            return Err(SimulatorError::CapacityExceeded);
        }
        op.validate(self.num_qubits)?;
        self.gates.push(op);
        Ok(self)
    }

    pub fn add_pauli_x(&mut self, qubit: usize) -> Result<&mut Self> {
        self.add_gate(GateOp::PauliX(qubit))
    }

    pub fn add_pauli_y(&mut self, qubit: usize) -> Result<&mut Self> {
        self.add_gate(GateOp::PauliY(qubit))
    }

    pub fn add_pauli_z(&mut self, qubit: usize) -> Result<&mut Self> {
        self.add_gate(GateOp::PauliZ(qubit))
    }

    pub fn add_hadamard(&mut self, qubit: usize) -> Result<&mut Self> {
        self.add_gate(GateOp::Hadamard(qubit))
    }

    pub fn add_phase(&mut self, qubit: usize, phi: f64) -> Result<&mut Self> {
        self.add_gate(GateOp::Phase(qubit, phi))
    }

    pub fn add_rotation_x(&mut self, qubit: usize, theta: f64) -> Result<&mut Self> {
        self.add_gate(GateOp::RotX(qubit, theta))
    }

    pub fn add_rotation_y(&mut self, qubit: usize, theta: f64) -> Result<&mut Self> {
        self.add_gate(GateOp::RotY(qubit, theta))
    }

    pub fn add_rotation_z(&mut self, qubit: usize, theta: f64) -> Result<&mut Self> {
        self.add_gate(GateOp::RotZ(qubit, theta))
    }

    pub fn add_cnot(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.add_gate(GateOp::Cnot(control, target))
    }

    pub fn add_cz(&mut self, control: usize, target: usize) -> Result<&mut Self> {
        self.add_gate(GateOp::Cz(control, target))
    }

    pub fn add_swap(&mut self, qubit1: usize, qubit2: usize) -> Result<&mut Self> {
        self.add_gate(GateOp::Swap(qubit1, qubit2))
    }

    pub fn add_measure(&mut self, qubit: usize) -> Result<&mut Self> {
        self.add_gate(GateOp::Measure(qubit))
    }

    pub fn add_measure_all(&mut self) -> Result<&mut Self> {
        self.add_gate(GateOp::MeasureAll)
    }

    /// Append every gate of `other` to this circuit
    pub fn append(&mut self, other: &Circuit) -> Result<&mut Self> {
        for &op in other.gates() {
            self.add_gate(op)?;
        }
        Ok(self)
    }

    /// Apply the circuit to a state in insertion order.
    ///
    /// Measurement gates collapse the state and report their outcomes as
    /// `tracing` events; they are not part of the return value. Succeeds
    /// iff every gate dispatched without a validation error.
    pub fn execute(&self, state: &mut QuantumState, rng: &mut impl Rng) -> Result<()> {
        if self.num_qubits != state.num_qubits() {
            return Err(SimulatorError::DimensionMismatch {
                expected: self.num_qubits,
                actual: state.num_qubits(),
            });
        }

        for op in &self.gates {
            match *op {
                GateOp::PauliX(q) => state.x(q)?,
                GateOp::PauliY(q) => state.y(q)?,
                GateOp::PauliZ(q) => state.z(q)?,
                GateOp::Hadamard(q) => state.h(q)?,
                GateOp::Phase(q, phi) => state.phase(q, phi)?,
                GateOp::RotX(q, theta) => state.rx(q, theta)?,
                GateOp::RotY(q, theta) => state.ry(q, theta)?,
                GateOp::RotZ(q, theta) => state.rz(q, theta)?,
                GateOp::Cnot(c, t) => state.cnot(c, t)?,
                GateOp::Cz(c, t) => state.cz(c, t)?,
                GateOp::Swap(a, b) => state.swap(a, b)?,
                GateOp::Measure(q) => {
                    let outcome = state.measure_qubit(q, rng)?;
                    info!(qubit = q, outcome, "measured qubit");
                }
                GateOp::MeasureAll => {
                    let outcome = state.measure_all(rng);
                    info!(
                        outcome,
                        binary = %crate::format_basis_state(outcome, self.num_qubits),
                        "measured register"
                    );
                }
            }
        }

        Ok(())
    }
}

impl std::fmt::Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Circuit '{}' ({} qubits, {} gates)",
            self.description,
            self.num_qubits,
            self.num_gates()
        )?;
        for (i, op) in self.gates.iter().enumerate() {
            write!(f, "  {}: {}", i + 1, op.label())?;
            let qubits = op.qubits();
            match qubits.len() {
                0 => {}
                1 => write!(f, " on qubit {}", qubits[0])?,
                _ => write!(f, " on qubits {},{}", qubits[0], qubits[1])?,
            }
            if let Some(p) = op.parameter() {
                write!(f, " (parameter: {p:.4})")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ==================== Common Circuit Patterns ====================

impl Circuit {
    /// H then CNOT: prepares (|00⟩ + |11⟩)/√2 from |00⟩
    pub fn bell_state() -> Result<Self> {
        let mut circuit = Circuit::new(2, "Bell state")?;
        circuit.add_hadamard(0)?.add_cnot(0, 1)?;
        Ok(circuit)
    }

    /// GHZ state over n qubits: H on 0 then a CNOT fan-out
    pub fn ghz_state(num_qubits: usize) -> Result<Self> {
        let mut circuit = Circuit::new(num_qubits, "GHZ state")?;
        circuit.add_hadamard(0)?;
        for target in 1..num_qubits {
            circuit.add_cnot(0, target)?;
        }
        Ok(circuit)
    }

    /// Deutsch's algorithm for a constant oracle.
    ///
    /// `constant_one` selects f(x) = 1 (a phase oracle realised as Z on
    /// the query qubit); otherwise f(x) = 0. Either way the final
    /// measurement of qubit 0 yields 0 with probability 1.
    pub fn deutsch(constant_one: bool) -> Result<Self> {
        let mut circuit = Circuit::new(2, "Deutsch algorithm")?;
        circuit.add_pauli_x(1)?;
        circuit.add_hadamard(0)?;
        circuit.add_hadamard(1)?;
        if constant_one {
            circuit.add_pauli_z(0)?;
        }
        circuit.add_hadamard(0)?;
        circuit.add_measure(0)?;
        Ok(circuit)
    }
}

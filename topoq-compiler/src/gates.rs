//! Named qubit gates for compilation input

use crate::error::{CompileError, Result};
use crate::matrices::{
    self, Su2Matrix, HADAMARD, PAULI_X, PAULI_Y, PAULI_Z, S_GATE, S_GATE_DAGGER, T_GATE,
    T_GATE_DAGGER,
};
use std::fmt;

/// A gate in a qubit-level program
///
/// Single-qubit gates carry their target qubit; two-qubit gates their qubit
/// pair. `Reset` exists so programs can be represented faithfully, but no
/// theory compiles it.
#[derive(Clone, Debug, PartialEq)]
pub enum QubitGate {
    H(usize),
    X(usize),
    Y(usize),
    Z(usize),
    S(usize),
    SDagger(usize),
    T(usize),
    TDagger(usize),
    RotationX(usize, f64),
    RotationY(usize, f64),
    RotationZ(usize, f64),
    Phase(usize, f64),
    Cnot { control: usize, target: usize },
    Cz { control: usize, target: usize },
    Swap { a: usize, b: usize },
    Reset(usize),
}

impl QubitGate {
    /// Gate name as it appears in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Self::H(_) => "H",
            Self::X(_) => "X",
            Self::Y(_) => "Y",
            Self::Z(_) => "Z",
            Self::S(_) => "S",
            Self::SDagger(_) => "Sdg",
            Self::T(_) => "T",
            Self::TDagger(_) => "Tdg",
            Self::RotationX(..) => "RX",
            Self::RotationY(..) => "RY",
            Self::RotationZ(..) => "RZ",
            Self::Phase(..) => "P",
            Self::Cnot { .. } => "CNOT",
            Self::Cz { .. } => "CZ",
            Self::Swap { .. } => "SWAP",
            Self::Reset(_) => "RESET",
        }
    }

    /// The qubits this gate touches, lowest first
    pub fn qubits(&self) -> Vec<usize> {
        match *self {
            Self::H(q)
            | Self::X(q)
            | Self::Y(q)
            | Self::Z(q)
            | Self::S(q)
            | Self::SDagger(q)
            | Self::T(q)
            | Self::TDagger(q)
            | Self::RotationX(q, _)
            | Self::RotationY(q, _)
            | Self::RotationZ(q, _)
            | Self::Phase(q, _)
            | Self::Reset(q) => vec![q],
            Self::Cnot { control, target } => {
                let mut v = vec![control, target];
                v.sort_unstable();
                v
            }
            Self::Cz { control, target } => {
                let mut v = vec![control, target];
                v.sort_unstable();
                v
            }
            Self::Swap { a, b } => {
                let mut v = vec![a, b];
                v.sort_unstable();
                v
            }
        }
    }

    /// The 2x2 matrix of a single-qubit gate
    ///
    /// # Errors
    /// Two-qubit gates and `Reset` have no single-qubit matrix.
    pub fn single_qubit_matrix(&self) -> Result<Su2Matrix> {
        Ok(match *self {
            Self::H(_) => HADAMARD,
            Self::X(_) => PAULI_X,
            Self::Y(_) => PAULI_Y,
            Self::Z(_) => PAULI_Z,
            Self::S(_) => S_GATE,
            Self::SDagger(_) => S_GATE_DAGGER,
            Self::T(_) => T_GATE,
            Self::TDagger(_) => T_GATE_DAGGER,
            Self::RotationX(_, theta) => matrices::rotation_x(theta),
            Self::RotationY(_, theta) => matrices::rotation_y(theta),
            Self::RotationZ(_, theta) => matrices::rotation_z(theta),
            Self::Phase(_, theta) => matrices::phase(theta),
            _ => {
                return Err(CompileError::UnsupportedGate {
                    gate: self.name().to_string(),
                    reason: "not a single-qubit unitary".to_string(),
                })
            }
        })
    }
}

impl fmt::Display for QubitGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cnot { control, target } | Self::Cz { control, target } => {
                write!(f, "{}(q{control}, q{target})", self.name())
            }
            Self::Swap { a, b } => write!(f, "SWAP(q{a}, q{b})"),
            Self::RotationX(q, t) | Self::RotationY(q, t) | Self::RotationZ(q, t)
            | Self::Phase(q, t) => write!(f, "{}(q{q}, {t:.4})", self.name()),
            other => write!(f, "{}(q{})", other.name(), other.qubits()[0]),
        }
    }
}

/// The named single-qubit gates used for braid summaries
pub fn named_single_qubit_gates() -> Vec<(&'static str, Su2Matrix)> {
    vec![
        ("I", matrices::IDENTITY),
        ("H", HADAMARD),
        ("X", PAULI_X),
        ("Y", PAULI_Y),
        ("Z", PAULI_Z),
        ("S", S_GATE),
        ("Sdg", S_GATE_DAGGER),
        ("T", T_GATE),
        ("Tdg", T_GATE_DAGGER),
    ]
}

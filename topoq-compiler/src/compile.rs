//! Gate-sequence to braid-sequence compilation
//!
//! Each qubit occupies a block of three strands. Single-qubit gates compile
//! to words inside their block: for Ising-like theories the Clifford gates
//! come from a fixed exact table, everything else goes through the
//! Solovay-Kitaev search. Two-qubit gates decompose into single-qubit gates
//! plus a double boundary exchange between neighboring blocks; `Reset` is
//! never supported.

use crate::braid_rep::BraidRep;
use crate::error::{CompileError, Result};
use crate::gates::{named_single_qubit_gates, QubitGate};
use crate::matrices::Su2Matrix;
use crate::solovay_kitaev::SolovayKitaev;
use topoq_braid::{Braid, Generator};
use topoq_core::AnyonType;

/// Strands per qubit block (three anyons carry one qubit)
pub const STRANDS_PER_QUBIT: usize = 3;

/// Default word length of the Solovay-Kitaev base alphabet
pub const DEFAULT_BASE_DEPTH: usize = 4;

/// Default Solovay-Kitaev recursion cap
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// How per-gate errors combine into a budget total
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum ErrorAccumulation {
    /// Plain sum of contributions
    #[default]
    Additive,
    /// Root of the sum of squares
    Quadratic,
    /// Diamond-norm accounting, combined additively
    DiamondNorm,
}

/// Tracked per-gate error contributions
#[derive(Clone, Debug, Default)]
pub struct ErrorBudget {
    pub policy: ErrorAccumulation,
    contributions: Vec<f64>,
}

impl ErrorBudget {
    /// An empty budget under a policy
    pub fn new(policy: ErrorAccumulation) -> Self {
        Self {
            policy,
            contributions: Vec::new(),
        }
    }

    /// Record one gate's error
    pub fn add(&mut self, error: f64) {
        self.contributions.push(error);
    }

    /// The recorded contributions in order
    pub fn contributions(&self) -> &[f64] {
        &self.contributions
    }

    /// Combined total under the policy
    pub fn total(&self) -> f64 {
        match self.policy {
            ErrorAccumulation::Additive | ErrorAccumulation::DiamondNorm => {
                self.contributions.iter().sum()
            }
            ErrorAccumulation::Quadratic => {
                self.contributions.iter().map(|e| e * e).sum::<f64>().sqrt()
            }
        }
    }
}

/// One compiled gate
#[derive(Clone, Debug)]
pub struct GateCompilation {
    pub gate: QubitGate,
    /// Braid word over the full strand array
    pub braid: Braid,
    /// Projective distance between the gate and its braid image
    pub error: f64,
    /// Whether the word came from the exact table rather than the search
    pub exact: bool,
}

/// A compiled gate sequence
#[derive(Clone, Debug)]
pub struct Compilation {
    /// The flat braid implementing the whole sequence
    pub braid: Braid,
    pub num_qubits: usize,
    pub gates: Vec<GateCompilation>,
    pub warnings: Vec<String>,
    pub budget: ErrorBudget,
}

/// Summary of a 3-strand braid word as a single-qubit gate
#[derive(Clone, Debug)]
pub struct BraidSummary {
    /// The word's matrix image
    pub matrix: Su2Matrix,
    /// The closest named gate
    pub nearest_gate: &'static str,
    /// Projective distance to that gate
    pub distance: f64,
}

/// The gate-to-braid compiler for one theory
pub struct GateToBraid {
    anyon_type: AnyonType,
    rep: BraidRep,
    sk: SolovayKitaev,
    policy: ErrorAccumulation,
}

impl GateToBraid {
    /// Build a compiler with the default base alphabet
    pub fn new(anyon_type: AnyonType) -> Result<Self> {
        Ok(Self {
            anyon_type,
            rep: BraidRep::new(anyon_type)?,
            sk: SolovayKitaev::new(anyon_type, DEFAULT_BASE_DEPTH)?,
            policy: ErrorAccumulation::default(),
        })
    }

    /// Use a different error-accumulation policy
    pub fn with_policy(mut self, policy: ErrorAccumulation) -> Self {
        self.policy = policy;
        self
    }

    /// Compile a gate sequence into one flat braid
    ///
    /// Fails fast on the first unsupported gate; warnings that do not stop
    /// compilation (non-universal theories, idealized entangling templates)
    /// accumulate on the result.
    pub fn compile(&self, gates: &[QubitGate], precision: f64) -> Result<Compilation> {
        if gates.is_empty() {
            return Err(CompileError::validation(
                "gates",
                "gate sequence must be non-empty",
            ));
        }
        let num_qubits = 1 + gates
            .iter()
            .flat_map(|g| g.qubits())
            .max()
            .expect("non-empty sequence");
        let strands = STRANDS_PER_QUBIT * num_qubits;

        let mut warnings = Vec::new();
        if self.anyon_type == AnyonType::SU2Level(4) {
            warnings.push("braiding alone is not universal for SU(2)_4".to_string());
        }

        let mut budget = ErrorBudget::new(self.policy);
        let mut flat = Braid::identity(strands)?;
        let mut compiled = Vec::new();
        for gate in gates {
            let unit = self.compile_gate(gate, precision, strands, &mut warnings)?;
            flat = flat.compose(&unit.braid)?;
            budget.add(unit.error);
            compiled.push(unit);
        }
        Ok(Compilation {
            braid: flat,
            num_qubits,
            gates: compiled,
            warnings,
            budget,
        })
    }

    fn compile_gate(
        &self,
        gate: &QubitGate,
        precision: f64,
        strands: usize,
        warnings: &mut Vec<String>,
    ) -> Result<GateCompilation> {
        match *gate {
            QubitGate::Reset(_) => Err(CompileError::UnsupportedGate {
                gate: gate.to_string(),
                reason: "Reset is never supported".to_string(),
            }),
            QubitGate::Cz { control, target } => {
                let braid = self.entangling_template(control, target, strands, warnings)?;
                Ok(GateCompilation {
                    gate: gate.clone(),
                    braid,
                    error: 0.0,
                    exact: true,
                })
            }
            QubitGate::Cnot { control, target } => {
                let h1 = self.compile_gate(&QubitGate::H(target), precision, strands, warnings)?;
                let cz = self.compile_gate(
                    &QubitGate::Cz { control, target },
                    precision,
                    strands,
                    warnings,
                )?;
                let h2 = self.compile_gate(&QubitGate::H(target), precision, strands, warnings)?;
                Ok(GateCompilation {
                    gate: gate.clone(),
                    braid: h1.braid.compose(&cz.braid)?.compose(&h2.braid)?,
                    error: h1.error + cz.error + h2.error,
                    exact: h1.exact && cz.exact && h2.exact,
                })
            }
            QubitGate::Swap { a, b } => {
                let c1 = self.compile_gate(
                    &QubitGate::Cnot { control: a, target: b },
                    precision,
                    strands,
                    warnings,
                )?;
                let c2 = self.compile_gate(
                    &QubitGate::Cnot { control: b, target: a },
                    precision,
                    strands,
                    warnings,
                )?;
                let c3 = self.compile_gate(
                    &QubitGate::Cnot { control: a, target: b },
                    precision,
                    strands,
                    warnings,
                )?;
                Ok(GateCompilation {
                    gate: gate.clone(),
                    braid: c1.braid.compose(&c2.braid)?.compose(&c3.braid)?,
                    error: c1.error + c2.error + c3.error,
                    exact: c1.exact && c2.exact && c3.exact,
                })
            }
            _ => {
                let qubit = gate.qubits()[0];
                let target = gate.single_qubit_matrix()?;
                let (local, error, exact) = self.single_qubit_word(&target, precision)?;
                Ok(GateCompilation {
                    gate: gate.clone(),
                    braid: offset_word(&local, qubit, strands)?,
                    error,
                    exact,
                })
            }
        }
    }

    fn single_qubit_word(
        &self,
        target: &Su2Matrix,
        precision: f64,
    ) -> Result<(Braid, f64, bool)> {
        if let Some(word) = self.exact_clifford_word(target)? {
            let image = self.rep.matrix(&word)?;
            return Ok((word.clone(), image.distance(target), true));
        }
        let result = self.sk.approximate_gate(target, precision, DEFAULT_MAX_DEPTH)?;
        Ok((result.braid, result.error, false))
    }

    /// Fixed braid words for the Clifford gates of Ising-like theories
    ///
    /// Ising braiding realizes exactly the single-qubit Clifford group, so
    /// Z, S, S-dagger, X, Y and H map to constant words with zero residual;
    /// T stays with the search (and keeps its Clifford-wall residual).
    fn exact_clifford_word(&self, target: &Su2Matrix) -> Result<Option<Braid>> {
        if !matches!(self.anyon_type, AnyonType::Ising | AnyonType::SU2Level(2)) {
            return Ok(None);
        }
        let words: [&[(usize, bool)]; 6] = [
            &[(0, true)],                         // S
            &[(0, false)],                        // S-dagger
            &[(0, true), (0, true)],              // Z
            &[(1, true), (1, true)],              // X
            &[(1, true), (1, true), (0, true), (0, true)], // Y
            &[(0, true), (1, true), (0, true)],   // H
        ];
        for gens in words {
            let word = Braid::from_generators(
                3,
                gens.iter()
                    .map(|&(index, clockwise)| Generator { index, clockwise })
                    .collect(),
            )?;
            if self.rep.matrix(&word)?.distance(target) < 1e-9 {
                return Ok(Some(word));
            }
        }
        Ok(None)
    }

    fn entangling_template(
        &self,
        control: usize,
        target: usize,
        strands: usize,
        warnings: &mut Vec<String>,
    ) -> Result<Braid> {
        if control == target {
            return Err(CompileError::validation(
                "gate",
                "control and target must differ",
            ));
        }
        if control.abs_diff(target) != 1 {
            return Err(CompileError::UnsupportedGate {
                gate: format!("CZ(q{control}, q{target})"),
                reason: "qubit blocks must be adjacent; route with SWAP".to_string(),
            });
        }
        if !matches!(self.anyon_type, AnyonType::Ising | AnyonType::SU2Level(2)) {
            let warning = format!(
                "CZ uses the idealized boundary-exchange template for {}",
                self.anyon_type
            );
            if !warnings.contains(&warning) {
                warnings.push(warning);
            }
        }
        // double exchange of the two anyons flanking the block boundary
        let boundary = STRANDS_PER_QUBIT * control.min(target) + STRANDS_PER_QUBIT - 1;
        Braid::from_generators(
            strands,
            vec![
                Generator { index: boundary, clockwise: true },
                Generator { index: boundary, clockwise: true },
            ],
        )
        .map_err(CompileError::from)
    }
}

/// Compile a gate sequence with the default compiler for `anyon_type`
///
/// # Example
/// ```
/// use topoq_compiler::{compile_gate_sequence, QubitGate};
/// use topoq_core::AnyonType;
///
/// let gates = [QubitGate::H(0), QubitGate::Cnot { control: 0, target: 1 }];
/// let compiled = compile_gate_sequence(&gates, 1e-2, AnyonType::Ising).unwrap();
/// assert!(compiled.budget.total() < 1e-9); // all-Clifford: exact
/// ```
pub fn compile_gate_sequence(
    gates: &[QubitGate],
    precision: f64,
    anyon_type: AnyonType,
) -> Result<Compilation> {
    GateToBraid::new(anyon_type)?.compile(gates, precision)
}

/// Summarize a 3-strand braid word as its nearest named single-qubit gate
pub fn summarize_braid(braid: &Braid, anyon_type: AnyonType) -> Result<BraidSummary> {
    let rep = BraidRep::new(anyon_type)?;
    let matrix = rep.matrix(braid)?;
    let (nearest_gate, distance) = named_single_qubit_gates()
        .into_iter()
        .map(|(name, gate)| (name, matrix.distance(&gate)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .expect("named gate list is non-empty");
    Ok(BraidSummary {
        matrix,
        nearest_gate,
        distance,
    })
}

fn offset_word(local: &Braid, qubit: usize, strands: usize) -> Result<Braid> {
    let offset = STRANDS_PER_QUBIT * qubit;
    Braid::from_generators(
        strands,
        local
            .generators()
            .iter()
            .map(|g| Generator {
                index: g.index + offset,
                clockwise: g.clockwise,
            })
            .collect(),
    )
    .map_err(CompileError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clifford_sequence_compiles_exactly_for_ising() {
        let gates = [
            QubitGate::H(0),
            QubitGate::S(0),
            QubitGate::Z(0),
            QubitGate::X(0),
        ];
        let compiled = compile_gate_sequence(&gates, 1e-2, AnyonType::Ising).unwrap();
        assert_eq!(compiled.num_qubits, 1);
        assert!(compiled.gates.iter().all(|g| g.exact));
        assert!(compiled.budget.total() < 1e-9);
        assert!(compiled.warnings.is_empty());
    }

    #[test]
    fn test_t_gate_carries_residual_error_for_ising() {
        let compiled =
            compile_gate_sequence(&[QubitGate::T(0)], 1e-4, AnyonType::Ising).unwrap();
        assert!(!compiled.gates[0].exact);
        assert!(compiled.gates[0].error > 0.1);
    }

    #[test]
    fn test_reset_is_never_supported() {
        for theory in [AnyonType::Ising, AnyonType::Fibonacci] {
            let res = compile_gate_sequence(&[QubitGate::Reset(0)], 1e-2, theory);
            assert!(matches!(res, Err(CompileError::UnsupportedGate { .. })), "{theory}");
        }
    }

    #[test]
    fn test_cnot_flattens_onto_six_strands() {
        let gates = [QubitGate::Cnot { control: 0, target: 1 }];
        let compiled = compile_gate_sequence(&gates, 1e-2, AnyonType::Ising).unwrap();
        assert_eq!(compiled.num_qubits, 2);
        assert_eq!(compiled.braid.strand_count(), 6);
        assert!(compiled.braid.len() > 2);
        // every generator index stays inside the strand array
        for g in compiled.braid.generators() {
            assert!(g.index < 5);
        }
    }

    #[test]
    fn test_non_adjacent_entangler_rejected() {
        let gates = [QubitGate::Cz { control: 0, target: 2 }];
        let res = compile_gate_sequence(&gates, 1e-2, AnyonType::Ising);
        assert!(matches!(res, Err(CompileError::UnsupportedGate { .. })));
    }

    #[test]
    fn test_su2_level_4_warns_about_universality() {
        let compiled =
            compile_gate_sequence(&[QubitGate::Z(0)], 1e-1, AnyonType::SU2Level(4)).unwrap();
        assert!(compiled
            .warnings
            .iter()
            .any(|w| w.contains("not universal")));
    }

    #[test]
    fn test_fibonacci_entangler_warns_about_template() {
        let gates = [QubitGate::Cz { control: 0, target: 1 }];
        let compiled = compile_gate_sequence(&gates, 1e-1, AnyonType::Fibonacci).unwrap();
        assert_eq!(
            compiled
                .warnings
                .iter()
                .filter(|w| w.contains("boundary-exchange"))
                .count(),
            1
        );
    }

    #[test]
    fn test_budget_policies() {
        let mut additive = ErrorBudget::new(ErrorAccumulation::Additive);
        let mut quadratic = ErrorBudget::new(ErrorAccumulation::Quadratic);
        let mut diamond = ErrorBudget::new(ErrorAccumulation::DiamondNorm);
        for e in [0.3, 0.4] {
            additive.add(e);
            quadratic.add(e);
            diamond.add(e);
        }
        assert!((additive.total() - 0.7).abs() < 1e-12);
        assert!((quadratic.total() - 0.5).abs() < 1e-12);
        // diamond-norm accounting combines additively
        assert!((diamond.total() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_summarize_braid_round_trips_the_exact_table() {
        let word = Braid::from_generators(
            3,
            vec![
                Generator { index: 0, clockwise: true },
                Generator { index: 1, clockwise: true },
                Generator { index: 0, clockwise: true },
            ],
        )
        .unwrap();
        let summary = summarize_braid(&word, AnyonType::Ising).unwrap();
        assert_eq!(summary.nearest_gate, "H");
        assert!(summary.distance < 1e-9);
    }

    #[test]
    fn test_empty_sequence_rejected() {
        assert!(matches!(
            compile_gate_sequence(&[], 1e-2, AnyonType::Ising),
            Err(CompileError::Validation { .. })
        ));
    }
}

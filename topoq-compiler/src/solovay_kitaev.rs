//! Solovay-Kitaev approximation of single-qubit gates by braid words
//!
//! The algorithm refines a closest-base-set guess by recursively factoring
//! the residual as a balanced group commutator (Dawson & Nielsen, 2005): if
//! U differs from its level-(n-1) approximation A by Delta = U A-dagger,
//! write Delta = V W V-dagger W-dagger with V, W rotations of equal angle,
//! approximate those one level down and assemble
//! U_n = V_(n-1) W_(n-1) V_(n-1)-dagger W_(n-1)-dagger A.
//!
//! Synthesis is fully deterministic: the base search breaks ties by first
//! (shortest) word, and no randomness enters anywhere.

use crate::braid_rep::{base_set, BaseGate, BraidRep};
use crate::error::{CompileError, Result};
use crate::matrices::{rotation_x, rotation_y, Su2Matrix, IDENTITY};
use topoq_braid::Braid;
use topoq_core::AnyonType;

/// Configuration and state of one synthesizer
pub struct SolovayKitaev {
    rep: BraidRep,
    base: Vec<BaseGate>,
}

/// One synthesized approximation
#[derive(Clone, Debug)]
pub struct SkResult {
    /// The braid word realizing the approximation
    pub braid: Braid,
    /// Its matrix image
    pub matrix: Su2Matrix,
    /// Projective operator distance to the target
    pub error: f64,
    /// Braid generators in the word
    pub gate_count: usize,
    /// Recursion depth that produced the result
    pub depth: usize,
}

impl SolovayKitaev {
    /// Build a synthesizer over all braid words up to `base_depth`
    pub fn new(anyon_type: AnyonType, base_depth: usize) -> Result<Self> {
        let rep = BraidRep::new(anyon_type)?;
        let base = base_set(&rep, base_depth)?;
        Ok(Self { rep, base })
    }

    /// The theory being compiled to
    pub fn anyon_type(&self) -> AnyonType {
        self.rep.anyon_type()
    }

    /// Size of the base alphabet
    pub fn base_len(&self) -> usize {
        self.base.len()
    }

    /// Approximate `target` to `precision`, recursing at most `max_depth`
    /// levels
    ///
    /// Deterministic: identical inputs produce identical words. The returned
    /// error is whatever the recursion achieved; it is below `precision`
    /// whenever the base set generates a dense enough image and `max_depth`
    /// suffices.
    ///
    /// # Errors
    /// Rejects non-unitary targets and non-positive precision.
    pub fn approximate_gate(
        &self,
        target: &Su2Matrix,
        precision: f64,
        max_depth: usize,
    ) -> Result<SkResult> {
        if !(precision > 0.0) {
            return Err(CompileError::validation(
                "precision",
                "must be a positive number",
            ));
        }
        if !target.is_unitary(1e-9) {
            return Err(CompileError::validation("target", "matrix is not unitary"));
        }

        // iterative deepening keeps the reported depth the one that converged
        let mut best = self.recurse(target, 0);
        let mut depth = 0;
        while best.1.distance(target) >= precision && depth < max_depth {
            depth += 1;
            best = self.recurse(target, depth);
        }
        let (braid, matrix) = best;
        let braid = braid.simplify();
        Ok(SkResult {
            error: matrix.distance(target),
            gate_count: braid.len(),
            matrix,
            braid,
            depth,
        })
    }

    fn recurse(&self, target: &Su2Matrix, depth: usize) -> (Braid, Su2Matrix) {
        if depth == 0 {
            return self.closest_base(target);
        }
        let (a_word, a_matrix) = self.recurse(target, depth - 1);
        let delta = *target * a_matrix.adjoint();
        let (v, w) = find_commutator_factorization(&delta);

        let (v_word, v_matrix) = self.recurse(&v, depth - 1);
        let (w_word, w_matrix) = self.recurse(&w, depth - 1);

        let matrix =
            v_matrix * w_matrix * v_matrix.adjoint() * w_matrix.adjoint() * a_matrix;
        // refinement only helps once the residual is small; keep the shorter
        // word whenever the commutator assembly fails to improve on it
        if matrix.distance(target) >= a_matrix.distance(target) {
            return (a_word, a_matrix);
        }
        // word order is application order, so the commutator reads right to left
        let word = a_word
            .compose(&w_word.inverse())
            .and_then(|b| b.compose(&v_word.inverse()))
            .and_then(|b| b.compose(&w_word))
            .and_then(|b| b.compose(&v_word))
            .expect("equal strand counts by construction");
        (word, matrix)
    }

    fn closest_base(&self, target: &Su2Matrix) -> (Braid, Su2Matrix) {
        let mut best = &self.base[0];
        let mut best_distance = f64::INFINITY;
        for candidate in &self.base {
            let d = candidate.matrix.distance(target);
            if d < best_distance {
                best_distance = d;
                best = candidate;
            }
        }
        (best.braid.clone(), best.matrix)
    }
}

/// Factor a near-identity rotation as a balanced group commutator
///
/// Returns (V, W) with Delta = V W V-dagger W-dagger. Both are rotations by
/// the same angle phi about the x and y axes, conjugated so the commutator's
/// rotation axis lands on Delta's.
pub fn find_commutator_factorization(delta: &Su2Matrix) -> (Su2Matrix, Su2Matrix) {
    let (theta, axis) = delta.to_axis_angle();
    let sin_half = (theta / 2.0).sin().abs();
    if sin_half < 1e-12 {
        return (IDENTITY, IDENTITY);
    }

    // balanced angle: sin(theta/2) = 2 sin^2(phi/2) sqrt(1 - sin^4(phi/2))
    let u = (1.0 - (1.0 - sin_half * sin_half).sqrt()) / 2.0;
    let phi = 2.0 * u.sqrt().sqrt().asin();

    let v = rotation_x(phi);
    let w = rotation_y(phi);
    let commutator = v * w * v.adjoint() * w.adjoint();
    let (_, commutator_axis) = commutator.to_axis_angle();

    let s = axis_aligner(commutator_axis, axis);
    (s * v * s.adjoint(), s * w * s.adjoint())
}

/// The SU(2) rotation taking unit axis `from` onto unit axis `to`
fn axis_aligner(from: [f64; 3], to: [f64; 3]) -> Su2Matrix {
    let dot = (from[0] * to[0] + from[1] * to[1] + from[2] * to[2]).clamp(-1.0, 1.0);
    let cross = [
        from[1] * to[2] - from[2] * to[1],
        from[2] * to[0] - from[0] * to[2],
        from[0] * to[1] - from[1] * to[0],
    ];
    let cross_norm = (cross[0] * cross[0] + cross[1] * cross[1] + cross[2] * cross[2]).sqrt();
    if cross_norm < 1e-12 {
        if dot > 0.0 {
            return IDENTITY;
        }
        // antiparallel: rotate pi about any axis perpendicular to `from`
        let perp = if from[0].abs() < 0.9 {
            [0.0, from[2], -from[1]]
        } else {
            [from[2], 0.0, -from[0]]
        };
        let norm = (perp[0] * perp[0] + perp[1] * perp[1] + perp[2] * perp[2]).sqrt();
        return Su2Matrix::from_axis_angle(
            std::f64::consts::PI,
            [perp[0] / norm, perp[1] / norm, perp[2] / norm],
        );
    }
    let angle = dot.acos();
    Su2Matrix::from_axis_angle(
        angle,
        [
            cross[0] / cross_norm,
            cross[1] / cross_norm,
            cross[2] / cross_norm,
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrices::{HADAMARD, PAULI_Z, S_GATE, T_GATE};
    use approx::assert_relative_eq;

    #[test]
    fn test_commutator_factorization_reconstructs_delta() {
        let deltas = [
            Su2Matrix::from_axis_angle(0.3, [0.0, 0.0, 1.0]),
            Su2Matrix::from_axis_angle(0.05, [1.0, 0.0, 0.0]),
            Su2Matrix::from_axis_angle(0.2, [0.6, 0.64, 0.48]),
        ];
        for delta in deltas {
            let (v, w) = find_commutator_factorization(&delta);
            let rebuilt = v * w * v.adjoint() * w.adjoint();
            assert!(
                rebuilt.distance(&delta) < 1e-9,
                "distance {}",
                rebuilt.distance(&delta)
            );
        }
    }

    #[test]
    fn test_identity_delta_factors_trivially() {
        let (v, w) = find_commutator_factorization(&IDENTITY);
        assert!(v.distance(&IDENTITY) < 1e-12);
        assert!(w.distance(&IDENTITY) < 1e-12);
    }

    #[test]
    fn test_ising_clifford_targets_are_exact_at_depth_zero() {
        let sk = SolovayKitaev::new(AnyonType::Ising, 4).unwrap();
        for target in [S_GATE, PAULI_Z, HADAMARD] {
            let result = sk.approximate_gate(&target, 1e-6, 3).unwrap();
            assert!(result.error < 1e-9);
            assert_eq!(result.depth, 0);
        }
    }

    #[test]
    fn test_ising_t_gate_hits_the_clifford_wall() {
        // Ising braiding is Clifford-only; the T gate keeps a fixed residual
        let sk = SolovayKitaev::new(AnyonType::Ising, 4).unwrap();
        let result = sk.approximate_gate(&T_GATE, 1e-6, 2).unwrap();
        assert!(result.error > 0.1);
        assert!(result.error < 0.3);
    }

    #[test]
    fn test_fibonacci_refinement_reduces_error() {
        let sk = SolovayKitaev::new(AnyonType::Fibonacci, 4).unwrap();
        let shallow = sk.approximate_gate(&T_GATE, 1e-12, 0).unwrap();
        let deep = sk.approximate_gate(&T_GATE, 1e-12, 2).unwrap();
        assert!(deep.error <= shallow.error + 1e-12);
        assert!(deep.gate_count > 0);
    }

    #[test]
    fn test_determinism() {
        let sk = SolovayKitaev::new(AnyonType::Fibonacci, 3).unwrap();
        let a = sk.approximate_gate(&HADAMARD, 1e-4, 2).unwrap();
        let b = sk.approximate_gate(&HADAMARD, 1e-4, 2).unwrap();
        assert_eq!(a.braid, b.braid);
        assert_relative_eq!(a.error, b.error, epsilon = 0.0);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let sk = SolovayKitaev::new(AnyonType::Ising, 3).unwrap();
        assert!(sk.approximate_gate(&HADAMARD, 0.0, 2).is_err());
        let not_unitary = Su2Matrix([[
            num_complex::Complex64::new(2.0, 0.0),
            num_complex::Complex64::new(0.0, 0.0),
        ], [
            num_complex::Complex64::new(0.0, 0.0),
            num_complex::Complex64::new(1.0, 0.0),
        ]]);
        assert!(sk.approximate_gate(&not_unitary, 1e-3, 2).is_err());
    }

    #[test]
    fn test_word_image_matches_reported_matrix() {
        let sk = SolovayKitaev::new(AnyonType::Fibonacci, 3).unwrap();
        let result = sk.approximate_gate(&S_GATE, 1e-3, 2).unwrap();
        let rep = BraidRep::new(AnyonType::Fibonacci).unwrap();
        let image = rep.matrix(&result.braid).unwrap();
        assert!(image.distance(&result.matrix) < 1e-9);
    }
}

//! Superpositions over fusion-tree basis states

use crate::error::{Result, StateError};
use ahash::AHashMap;
use num_complex::Complex64;
use topoq_core::{AnyonType, FusionTree, FusionTreeState};

/// Tolerance for normalization checks
pub const NORM_TOLERANCE: f64 = 1e-9;

/// One weighted basis state
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    pub amplitude: Complex64,
    pub state: FusionTreeState,
}

impl Term {
    /// Pair an amplitude with a basis state
    #[inline]
    pub fn new(amplitude: Complex64, state: FusionTreeState) -> Self {
        Self { amplitude, state }
    }
}

/// Born-rule probability of one amplitude
#[inline]
pub fn probability(amplitude: Complex64) -> f64 {
    amplitude.norm_sqr()
}

/// An ordered list of weighted fusion-tree states sharing one theory
///
/// Terms may repeat the same tree; construction never merges them. The
/// evolution operators merge their own output so unitarity shows up as unit
/// norm, and [`Superposition::merged`] is available to consumers that want
/// amplitudes summed per distinct tree.
///
/// # Example
/// ```
/// use topoq_core::{AnyonType, FusionTree, FusionTreeState, Particle};
/// use topoq_state::Superposition;
///
/// let pair = FusionTree::fuse(
///     FusionTree::leaf(Particle::Sigma),
///     FusionTree::leaf(Particle::Sigma),
///     Particle::Vacuum,
/// );
/// let sp = Superposition::pure_state(FusionTreeState::new(pair, AnyonType::Ising));
/// assert!(sp.is_normalized());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Superposition {
    anyon_type: AnyonType,
    terms: Vec<Term>,
}

impl Superposition {
    /// The empty superposition of a theory
    #[inline]
    pub fn empty(anyon_type: AnyonType) -> Self {
        Self {
            anyon_type,
            terms: Vec::new(),
        }
    }

    /// A single basis state with amplitude 1
    pub fn pure_state(state: FusionTreeState) -> Self {
        let anyon_type = state.anyon_type;
        Self {
            anyon_type,
            terms: vec![Term::new(Complex64::new(1.0, 0.0), state)],
        }
    }

    /// An equal-amplitude normalized superposition over the given states
    ///
    /// # Errors
    /// Fails on an empty state list or on states from a different theory.
    pub fn uniform(states: Vec<FusionTreeState>, anyon_type: AnyonType) -> Result<Self> {
        if states.is_empty() {
            return Err(StateError::Anyon(topoq_core::AnyonError::validation(
                "states",
                "uniform superposition needs at least one state",
            )));
        }
        let amp = Complex64::new(1.0 / (states.len() as f64).sqrt(), 0.0);
        let terms = states
            .into_iter()
            .map(|s| {
                if s.anyon_type != anyon_type {
                    return Err(StateError::MixedTheories {
                        expected: anyon_type,
                        found: s.anyon_type,
                    });
                }
                Ok(Term::new(amp, s))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { anyon_type, terms })
    }

    /// A superposition from explicit terms
    ///
    /// # Errors
    /// Fails when a term's theory differs from `anyon_type`.
    pub fn from_terms(anyon_type: AnyonType, terms: Vec<Term>) -> Result<Self> {
        for t in &terms {
            if t.state.anyon_type != anyon_type {
                return Err(StateError::MixedTheories {
                    expected: anyon_type,
                    found: t.state.anyon_type,
                });
            }
        }
        Ok(Self { anyon_type, terms })
    }

    /// The theory all terms share
    #[inline]
    pub fn anyon_type(&self) -> AnyonType {
        self.anyon_type
    }

    /// The weighted terms in order
    #[inline]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Number of terms
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the superposition holds no terms
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Sum of squared amplitude magnitudes
    pub fn norm_squared(&self) -> f64 {
        self.terms.iter().map(|t| t.amplitude.norm_sqr()).sum()
    }

    /// Whether the norm is 1 within [`NORM_TOLERANCE`]
    pub fn is_normalized(&self) -> bool {
        (self.norm_squared() - 1.0).abs() < NORM_TOLERANCE
    }

    /// Divide every amplitude by the norm
    ///
    /// A superposition with exactly zero norm (including the empty one) is
    /// returned unchanged rather than divided by zero.
    pub fn normalize(&self) -> Superposition {
        let norm = self.norm_squared().sqrt();
        if norm == 0.0 {
            return self.clone();
        }
        Superposition {
            anyon_type: self.anyon_type,
            terms: self
                .terms
                .iter()
                .map(|t| Term::new(t.amplitude / norm, t.state.clone()))
                .collect(),
        }
    }

    /// Sum amplitudes per distinct tree, dropping terms that cancel away
    pub fn merged(&self) -> Superposition {
        let mut index: AHashMap<&FusionTree, usize> = AHashMap::new();
        let mut merged: Vec<Term> = Vec::new();
        for t in &self.terms {
            match index.get(&t.state.tree) {
                Some(&i) => merged[i].amplitude += t.amplitude,
                None => {
                    index.insert(&t.state.tree, merged.len());
                    merged.push(t.clone());
                }
            }
        }
        merged.retain(|t| t.amplitude.norm_sqr() > 1e-24);
        Superposition {
            anyon_type: self.anyon_type,
            terms: merged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use topoq_core::Particle;

    fn pair_state(channel: Particle) -> FusionTreeState {
        FusionTreeState::new(
            FusionTree::fuse(
                FusionTree::leaf(Particle::Sigma),
                FusionTree::leaf(Particle::Sigma),
                channel,
            ),
            AnyonType::Ising,
        )
    }

    #[test]
    fn test_pure_state_is_normalized() {
        let sp = Superposition::pure_state(pair_state(Particle::Vacuum));
        assert!(sp.is_normalized());
        assert_eq!(sp.len(), 1);
    }

    #[test]
    fn test_uniform_superposition() {
        let sp = Superposition::uniform(
            vec![pair_state(Particle::Vacuum), pair_state(Particle::Psi)],
            AnyonType::Ising,
        )
        .unwrap();
        assert!(sp.is_normalized());
        assert_relative_eq!(probability(sp.terms()[0].amplitude), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_uniform_rejects_mixed_theories() {
        let fib = FusionTreeState::new(FusionTree::leaf(Particle::Tau), AnyonType::Fibonacci);
        let res = Superposition::uniform(
            vec![pair_state(Particle::Vacuum), fib],
            AnyonType::Ising,
        );
        assert!(matches!(res, Err(StateError::MixedTheories { .. })));
    }

    #[test]
    fn test_normalize_scales_amplitudes() {
        let sp = Superposition::from_terms(
            AnyonType::Ising,
            vec![
                Term::new(Complex64::new(3.0, 0.0), pair_state(Particle::Vacuum)),
                Term::new(Complex64::new(0.0, 4.0), pair_state(Particle::Psi)),
            ],
        )
        .unwrap();
        let n = sp.normalize();
        assert!(n.is_normalized());
        assert_relative_eq!(probability(n.terms()[0].amplitude), 9.0 / 25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_norm_returned_unchanged() {
        let zero = Superposition::from_terms(
            AnyonType::Ising,
            vec![Term::new(Complex64::new(0.0, 0.0), pair_state(Particle::Vacuum))],
        )
        .unwrap();
        assert_eq!(zero.normalize(), zero);

        let empty = Superposition::empty(AnyonType::Ising);
        assert_eq!(empty.normalize(), empty);
    }

    #[test]
    fn test_duplicate_terms_not_auto_merged() {
        let sp = Superposition::from_terms(
            AnyonType::Ising,
            vec![
                Term::new(Complex64::new(0.5, 0.0), pair_state(Particle::Vacuum)),
                Term::new(Complex64::new(0.5, 0.0), pair_state(Particle::Vacuum)),
            ],
        )
        .unwrap();
        assert_eq!(sp.len(), 2);
        let merged = sp.merged();
        assert_eq!(merged.len(), 1);
        assert_relative_eq!(merged.terms()[0].amplitude.re, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_merged_drops_cancelling_terms() {
        let sp = Superposition::from_terms(
            AnyonType::Ising,
            vec![
                Term::new(Complex64::new(0.5, 0.0), pair_state(Particle::Vacuum)),
                Term::new(Complex64::new(-0.5, 0.0), pair_state(Particle::Vacuum)),
                Term::new(Complex64::new(1.0, 0.0), pair_state(Particle::Psi)),
            ],
        )
        .unwrap();
        let merged = sp.merged();
        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged.terms()[0].state.tree.total_charge(),
            Particle::Psi
        );
    }
}

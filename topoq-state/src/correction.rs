//! Anyonic charge-error detection and correction
//!
//! A charge violation is a fusion node whose declared channel is not an
//! allowed outcome of its children. Violations are located by a recursive
//! walk (deepest first, left to right), repaired greedily to the first
//! allowed channel in canonical particle order, and superpositions are
//! projected back onto a fixed total-charge code space.

use crate::error::{Result, StateError};
use crate::superposition::{Superposition, Term};
use smallvec::smallvec;
use topoq_core::{
    AnyonError, AnyonType, Branch, FusionTree, FusionTreeState, Particle, TreePath,
};

/// One charge violation inside a fusion tree
#[derive(Clone, Debug, PartialEq)]
pub struct Violation {
    /// Path from the root to the violating node
    pub path: TreePath,
    /// The channel the node declares
    pub actual: Particle,
    /// The channels the fusion rule would allow
    pub allowed: Vec<Particle>,
}

/// Violation summary of one state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Syndrome {
    pub violation_count: usize,
    pub is_clean: bool,
}

/// Result of running the greedy decoder over one tree
#[derive(Clone, Debug, PartialEq)]
pub struct Correction {
    pub tree: FusionTree,
    pub corrections_applied: usize,
}

/// Find every charge violation in a tree, deepest first
///
/// A valid tree yields an empty list. Foreign particles are an error, as
/// everywhere else.
pub fn detect_charge_violations(
    tree: &FusionTree,
    anyon_type: AnyonType,
) -> Result<Vec<Violation>> {
    let mut violations = Vec::new();
    walk(tree, anyon_type, &mut smallvec![], &mut violations)?;
    Ok(violations)
}

fn walk(
    tree: &FusionTree,
    anyon_type: AnyonType,
    path: &mut TreePath,
    out: &mut Vec<Violation>,
) -> Result<()> {
    match tree {
        FusionTree::Leaf(p) => {
            anyon_type.check_member(*p)?;
            Ok(())
        }
        FusionTree::Fusion { left, right, channel } => {
            path.push(Branch::Left);
            walk(left, anyon_type, path, out)?;
            path.pop();
            path.push(Branch::Right);
            walk(right, anyon_type, path, out)?;
            path.pop();

            let allowed = anyon_type.fuse(left.total_charge(), right.total_charge())?;
            if !allowed.contains(channel) {
                out.push(Violation {
                    path: path.clone(),
                    actual: *channel,
                    allowed,
                });
            }
            Ok(())
        }
    }
}

/// Replace the channel at `path` with a different allowed channel
///
/// Used to inject controlled errors for decoder tests.
///
/// # Errors
/// Fails on leaves, out-of-range paths and nodes with no alternative channel.
pub fn inject_charge_flip(
    tree: &FusionTree,
    path: &[Branch],
    anyon_type: AnyonType,
) -> Result<FusionTree> {
    let node = tree.node_at(path).ok_or_else(|| {
        StateError::Anyon(AnyonError::validation("path", "path runs off the tree"))
    })?;
    let FusionTree::Fusion { left, right, channel } = node else {
        return Err(StateError::Anyon(AnyonError::validation(
            "path",
            "a leaf carries no fusion channel",
        )));
    };
    let flipped = anyon_type
        .fuse(left.total_charge(), right.total_charge())?
        .into_iter()
        .find(|c| c != channel)
        .ok_or_else(|| {
            StateError::Operation(format!(
                "{} x {} admits no channel other than {channel}",
                left.total_charge(),
                right.total_charge()
            ))
        })?;
    Ok(tree.with_channel_at(path, flipped)?)
}

/// Wrap the violation count of a state for diagnostics
pub fn extract_syndrome(state: &FusionTreeState) -> Result<Syndrome> {
    let violations = detect_charge_violations(&state.tree, state.anyon_type)?;
    Ok(Syndrome {
        violation_count: violations.len(),
        is_clean: violations.is_empty(),
    })
}

/// Greedy decoder: repair the first violation until the tree is clean
///
/// Each repair replaces the violating channel with the first allowed channel
/// in canonical particle order; because violations are reported deepest
/// first, a repaired subtree is never revisited. Valid trees and leaves are
/// a no-op with zero corrections.
pub fn correct_charge_violations(state: &FusionTreeState) -> Result<Correction> {
    let mut tree = state.tree.clone();
    let mut corrections_applied = 0;
    // every repair fixes one node for good, so the node count bounds the loop
    let max_rounds = tree.size().max(1) * 2;
    for _ in 0..max_rounds {
        let violations = detect_charge_violations(&tree, state.anyon_type)?;
        let Some(first) = violations.first() else {
            return Ok(Correction {
                tree,
                corrections_applied,
            });
        };
        let repaired = first
            .allowed
            .first()
            .copied()
            .ok_or_else(|| StateError::Operation("violating node admits no channel".into()))?;
        tree = tree.with_channel_at(&first.path, repaired)?;
        corrections_applied += 1;
    }
    Err(StateError::Operation(
        "charge correction made no progress".into(),
    ))
}

/// Keep only the terms whose total charge matches, then renormalize
///
/// An empty input (or one with no matching term) yields an empty
/// superposition rather than an error.
pub fn project_to_code_space(
    superposition: &Superposition,
    target_charge: Particle,
) -> Result<Superposition> {
    superposition.anyon_type().check_member(target_charge)?;
    let kept: Vec<Term> = superposition
        .terms()
        .iter()
        .filter(|t| t.state.tree.total_charge() == target_charge)
        .cloned()
        .collect();
    Ok(Superposition::from_terms(superposition.anyon_type(), kept)?.normalize())
}

/// Detect, correct each term, then project onto the target charge
pub fn full_correction(
    superposition: &Superposition,
    target_charge: Particle,
) -> Result<Superposition> {
    let anyon_type = superposition.anyon_type();
    let mut corrected = Vec::new();
    for t in superposition.terms() {
        let fixed = correct_charge_violations(&t.state)?;
        corrected.push(Term::new(
            t.amplitude,
            FusionTreeState::new(fixed.tree, anyon_type),
        ));
    }
    let corrected = Superposition::from_terms(anyon_type, corrected)?;
    project_to_code_space(&corrected, target_charge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn sigma_chain(channels: &[Particle]) -> FusionTree {
        let mut tree = FusionTree::leaf(Particle::Sigma);
        for &c in channels {
            tree = FusionTree::fuse(tree, FusionTree::leaf(Particle::Sigma), c);
        }
        tree
    }

    #[test]
    fn test_valid_tree_has_no_violations() {
        let tree = sigma_chain(&[Particle::Vacuum, Particle::Sigma, Particle::Psi]);
        let v = detect_charge_violations(&tree, AnyonType::Ising).unwrap();
        assert!(v.is_empty());
        assert!(detect_charge_violations(&FusionTree::leaf(Particle::Psi), AnyonType::Ising)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_violation_records_path_and_alternatives() {
        // root channel sigma is impossible for sigma x sigma
        let tree = FusionTree::fuse(
            FusionTree::leaf(Particle::Sigma),
            FusionTree::leaf(Particle::Sigma),
            Particle::Sigma,
        );
        let v = detect_charge_violations(&tree, AnyonType::Ising).unwrap();
        assert_eq!(v.len(), 1);
        assert!(v[0].path.is_empty());
        assert_eq!(v[0].actual, Particle::Sigma);
        assert_eq!(v[0].allowed, vec![Particle::Vacuum, Particle::Psi]);
    }

    #[test]
    fn test_inject_then_detect_round_trip() {
        let tree = sigma_chain(&[Particle::Vacuum, Particle::Sigma, Particle::Psi]);
        let corrupted =
            inject_charge_flip(&tree, &[Branch::Left, Branch::Left], AnyonType::Ising).unwrap();
        let v = detect_charge_violations(&corrupted, AnyonType::Ising).unwrap();
        // flipping 1 -> psi at the innermost pair invalidates no fusion there,
        // but shifts the chain charge so an ancestor violates instead
        assert!(!v.is_empty() || corrupted.is_valid(AnyonType::Ising).unwrap());
    }

    #[test]
    fn test_inject_fails_on_leaf_and_forced_channels() {
        let tree = sigma_chain(&[Particle::Vacuum]);
        assert!(inject_charge_flip(&tree, &[Branch::Left], AnyonType::Ising).is_err());

        // sigma x psi = sigma leaves nothing to flip to
        let forced = FusionTree::fuse(
            FusionTree::leaf(Particle::Sigma),
            FusionTree::leaf(Particle::Psi),
            Particle::Sigma,
        );
        assert!(matches!(
            inject_charge_flip(&forced, &[], AnyonType::Ising),
            Err(StateError::Operation(_))
        ));
    }

    #[test]
    fn test_decoder_repairs_to_clean_tree() {
        let tree = FusionTree::fuse(
            FusionTree::fuse(
                FusionTree::leaf(Particle::Sigma),
                FusionTree::leaf(Particle::Sigma),
                Particle::Sigma, // violation: sigma x sigma -> sigma
            ),
            FusionTree::leaf(Particle::Sigma),
            Particle::Sigma,
        );
        let state = FusionTreeState::new(tree, AnyonType::Ising);
        let fixed = correct_charge_violations(&state).unwrap();
        assert!(fixed.corrections_applied >= 1);
        assert!(detect_charge_violations(&fixed.tree, AnyonType::Ising)
            .unwrap()
            .is_empty());
        // tie-break: the first allowed channel in canonical order is chosen
        assert_eq!(
            fixed.tree.node_at(&[Branch::Left]).unwrap().total_charge(),
            Particle::Vacuum
        );
    }

    #[test]
    fn test_decoder_is_idempotent_and_noop_on_valid_trees() {
        let valid = FusionTreeState::new(
            sigma_chain(&[Particle::Psi, Particle::Sigma, Particle::Vacuum]),
            AnyonType::Ising,
        );
        let once = correct_charge_violations(&valid).unwrap();
        assert_eq!(once.corrections_applied, 0);
        assert_eq!(once.tree, valid.tree);

        let corrupted = FusionTreeState::new(
            sigma_chain(&[Particle::Sigma, Particle::Sigma, Particle::Sigma]),
            AnyonType::Ising,
        );
        let first = correct_charge_violations(&corrupted).unwrap();
        let second =
            correct_charge_violations(&FusionTreeState::new(first.tree.clone(), AnyonType::Ising))
                .unwrap();
        assert_eq!(second.corrections_applied, 0);
        assert_eq!(second.tree, first.tree);
    }

    #[test]
    fn test_projection_filters_and_renormalizes() {
        let vac = FusionTreeState::new(sigma_chain(&[Particle::Vacuum]), AnyonType::Ising);
        let psi = FusionTreeState::new(sigma_chain(&[Particle::Psi]), AnyonType::Ising);
        let sp = Superposition::uniform(vec![vac, psi], AnyonType::Ising).unwrap();

        let projected = project_to_code_space(&sp, Particle::Vacuum).unwrap();
        assert_eq!(projected.len(), 1);
        assert!(projected.is_normalized());
        assert_eq!(
            projected.terms()[0].state.tree.total_charge(),
            Particle::Vacuum
        );
    }

    #[test]
    fn test_projection_of_empty_input_stays_empty() {
        let empty = Superposition::empty(AnyonType::Ising);
        let projected = project_to_code_space(&empty, Particle::Vacuum).unwrap();
        assert!(projected.is_empty());
    }

    #[test]
    fn test_projection_leaves_uniform_charge_unchanged() {
        let vac = FusionTreeState::new(sigma_chain(&[Particle::Vacuum]), AnyonType::Ising);
        let sp = Superposition::from_terms(
            AnyonType::Ising,
            vec![Term::new(Complex64::new(1.0, 0.0), vac)],
        )
        .unwrap();
        let projected = project_to_code_space(&sp, Particle::Vacuum).unwrap();
        assert_eq!(projected, sp);
    }

    #[test]
    fn test_full_correction_pipeline() {
        let clean = sigma_chain(&[Particle::Vacuum, Particle::Sigma, Particle::Vacuum]);
        let corrupted =
            inject_charge_flip(&clean, &[Branch::Left, Branch::Left], AnyonType::Ising).unwrap();
        let sp = Superposition::uniform(
            vec![
                FusionTreeState::new(clean, AnyonType::Ising),
                FusionTreeState::new(corrupted, AnyonType::Ising),
            ],
            AnyonType::Ising,
        )
        .unwrap();

        let recovered = full_correction(&sp, Particle::Vacuum).unwrap();
        assert!(recovered.is_normalized());
        for t in recovered.terms() {
            assert!(t.state.is_valid().unwrap());
            assert_eq!(t.state.tree.total_charge(), Particle::Vacuum);
        }
    }
}

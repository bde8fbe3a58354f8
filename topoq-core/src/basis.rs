//! Computational-basis encoding of fusion trees
//!
//! A bit string is encoded as pairs of spin-1/2-like particles, each pair
//! fused to the vacuum (bit 0) or the next-higher channel (bit 1). Pair
//! blocks are combined left-associatively using the first allowed channel in
//! canonical order, so the encoding is deterministic and the round-trip is
//! exact.

use crate::error::{AnyonError, Result};
use crate::model::AnyonType;
use crate::particle::Particle;
use crate::tree::{FusionTree, FusionTreeState};

/// The qubit encoding of a theory: pair particle plus its bit-0/bit-1 channels
///
/// # Errors
/// Fails when the theory's fusion rule collapses both bit values into one
/// channel (SU(2)_1 has only the vacuum channel for a spin-1/2 pair).
pub fn qubit_channels(anyon_type: AnyonType) -> Result<(Particle, Particle, Particle)> {
    let pair = match anyon_type {
        AnyonType::Ising => Particle::Sigma,
        AnyonType::Fibonacci => Particle::Tau,
        AnyonType::SU2Level(k) => Particle::spin_half(k),
    };
    let outcomes = anyon_type.fuse(pair, pair)?;
    if outcomes.len() < 2 {
        return Err(AnyonError::validation(
            "anyon_type",
            format!("{anyon_type} fuses both bit values to the same channel"),
        ));
    }
    Ok((pair, outcomes[0], outcomes[1]))
}

/// Encode a bit string as a fusion tree of particle pairs
///
/// # Example
/// ```
/// use topoq_core::{from_computational_basis, to_computational_basis, AnyonType};
///
/// let state = from_computational_basis(&[0, 1, 1], AnyonType::Ising).unwrap();
/// assert_eq!(state.tree.size(), 6);
/// assert_eq!(to_computational_basis(&state).unwrap(), vec![0, 1, 1]);
/// ```
pub fn from_computational_basis(bits: &[u8], anyon_type: AnyonType) -> Result<FusionTreeState> {
    if bits.is_empty() {
        return Err(AnyonError::validation("bits", "bit string must be non-empty"));
    }
    if let Some(bad) = bits.iter().find(|&&b| b > 1) {
        return Err(AnyonError::validation("bits", format!("{bad} is not a bit")));
    }
    let (pair, zero, one) = qubit_channels(anyon_type)?;

    let block = |bit: u8| {
        FusionTree::fuse(
            FusionTree::leaf(pair),
            FusionTree::leaf(pair),
            if bit == 0 { zero } else { one },
        )
    };

    let mut tree = block(bits[0]);
    for &bit in &bits[1..] {
        let next = block(bit);
        let channel = anyon_type
            .fuse(tree.total_charge(), next.total_charge())?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AnyonError::validation("bits", "pair charges admit no combined channel")
            })?;
        tree = FusionTree::fuse(tree, next, channel);
    }
    Ok(FusionTreeState::new(tree, anyon_type))
}

/// Decode a pair-encoded fusion tree back to its bit string
///
/// # Errors
/// Fails if the tree is not in the pair encoding produced by
/// [`from_computational_basis`].
pub fn to_computational_basis(state: &FusionTreeState) -> Result<Vec<u8>> {
    let (pair, zero, one) = qubit_channels(state.anyon_type)?;
    let mut bits = Vec::with_capacity(state.tree.size() / 2);
    decode_blocks(&state.tree, pair, zero, one, &mut bits)?;
    Ok(bits)
}

fn decode_blocks(
    tree: &FusionTree,
    pair: Particle,
    zero: Particle,
    one: Particle,
    bits: &mut Vec<u8>,
) -> Result<()> {
    match tree {
        FusionTree::Fusion { left, right, channel }
            if matches!(**left, FusionTree::Leaf(p) if p == pair)
                && matches!(**right, FusionTree::Leaf(p) if p == pair) =>
        {
            if *channel == zero {
                bits.push(0);
            } else if *channel == one {
                bits.push(1);
            } else {
                return Err(AnyonError::validation(
                    "tree",
                    format!("pair channel {channel} encodes no bit"),
                ));
            }
            Ok(())
        }
        FusionTree::Fusion { left, right, .. } => {
            decode_blocks(left, pair, zero, one, bits)?;
            decode_blocks(right, pair, zero, one, bits)
        }
        FusionTree::Leaf(_) => Err(AnyonError::validation(
            "tree",
            "not a pair-encoded computational-basis tree",
        )),
    }
}

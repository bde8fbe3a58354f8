//! Fusion trees: the basis states of anyonic Hilbert spaces
//!
//! A [`FusionTree`] records how a sequence of anyons is pairwise combined into
//! a total charge. Trees are persistent immutable values: every transformation
//! returns a new tree. Constructors perform no validation so that
//! deliberately-invalid trees can be built for error-injection tests;
//! [`FusionTree::is_valid`] performs the full recursive check.

use crate::error::{AnyonError, Result};
use crate::model::AnyonType;
use crate::particle::Particle;

/// One step from a fusion node to a child
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Branch {
    Left,
    Right,
}

/// A path from the root of a tree, as a sequence of branch choices
pub type TreePath = smallvec::SmallVec<[Branch; 8]>;

/// A binary fusion tree over particles
///
/// Equality is structural: two trees are equal iff they have identical shape,
/// leaf sequence and channels.
///
/// # Example
/// ```
/// use topoq_core::{AnyonType, FusionTree, Particle};
///
/// // (sigma x sigma) -> vacuum
/// let pair = FusionTree::fuse(
///     FusionTree::leaf(Particle::Sigma),
///     FusionTree::leaf(Particle::Sigma),
///     Particle::Vacuum,
/// );
/// assert_eq!(pair.size(), 2);
/// assert!(pair.is_valid(AnyonType::Ising).unwrap());
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FusionTree {
    /// A single anyon
    Leaf(Particle),
    /// An ordered pair of subtrees and the channel they fuse to
    Fusion {
        left: Box<FusionTree>,
        right: Box<FusionTree>,
        channel: Particle,
    },
}

impl FusionTree {
    /// A leaf holding one particle
    #[inline]
    pub fn leaf(p: Particle) -> Self {
        Self::Leaf(p)
    }

    /// Fuse two subtrees into `channel`, without validation
    #[inline]
    pub fn fuse(left: FusionTree, right: FusionTree, channel: Particle) -> Self {
        Self::Fusion {
            left: Box::new(left),
            right: Box::new(right),
            channel,
        }
    }

    /// The total charge: the leaf particle, or the root channel
    #[inline]
    pub fn total_charge(&self) -> Particle {
        match self {
            Self::Leaf(p) => *p,
            Self::Fusion { channel, .. } => *channel,
        }
    }

    /// Number of leaves
    pub fn size(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Fusion { left, right, .. } => left.size() + right.size(),
        }
    }

    /// Nesting depth; a leaf has depth 0
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Fusion { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// The leaf particles in left-to-right order
    pub fn leaves(&self) -> Vec<Particle> {
        let mut out = Vec::with_capacity(self.size());
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<Particle>) {
        match self {
            Self::Leaf(p) => out.push(*p),
            Self::Fusion { left, right, .. } => {
                left.collect_leaves(out);
                right.collect_leaves(out);
            }
        }
    }

    /// Check every fusion node's channel against its children's total charges
    ///
    /// Returns `Ok(false)` for a tree containing a disallowed channel, and an
    /// error if any particle in the tree does not belong to `anyon_type`
    /// (mixed-theory trees are always rejected).
    pub fn is_valid(&self, anyon_type: AnyonType) -> Result<bool> {
        match self {
            Self::Leaf(p) => {
                anyon_type.check_member(*p)?;
                Ok(true)
            }
            Self::Fusion { left, right, channel } => {
                if !left.is_valid(anyon_type)? || !right.is_valid(anyon_type)? {
                    return Ok(false);
                }
                anyon_type.can_fuse(left.total_charge(), right.total_charge(), *channel)
            }
        }
    }

    /// The subtree at `path`, or `None` if the path runs off the tree
    pub fn node_at(&self, path: &[Branch]) -> Option<&FusionTree> {
        let mut node = self;
        for step in path {
            match node {
                Self::Leaf(_) => return None,
                Self::Fusion { left, right, .. } => {
                    node = match step {
                        Branch::Left => left,
                        Branch::Right => right,
                    };
                }
            }
        }
        Some(node)
    }

    /// A copy of this tree with the channel at `path` replaced
    ///
    /// # Errors
    /// Fails if `path` does not address a fusion node.
    pub fn with_channel_at(&self, path: &[Branch], channel: Particle) -> Result<FusionTree> {
        match (self, path.first()) {
            (Self::Leaf(_), None) => Err(AnyonError::validation(
                "path",
                "a leaf carries no fusion channel",
            )),
            (Self::Leaf(_), Some(_)) => {
                Err(AnyonError::validation("path", "path runs past a leaf"))
            }
            (Self::Fusion { left, right, .. }, None) => Ok(Self::Fusion {
                left: left.clone(),
                right: right.clone(),
                channel,
            }),
            (Self::Fusion { left, right, channel: c }, Some(step)) => {
                let (new_left, new_right) = match step {
                    Branch::Left => (left.with_channel_at(&path[1..], channel)?, (**right).clone()),
                    Branch::Right => ((**left).clone(), right.with_channel_at(&path[1..], channel)?),
                };
                Ok(Self::Fusion {
                    left: Box::new(new_left),
                    right: Box::new(new_right),
                    channel: *c,
                })
            }
        }
    }
}

/// A fusion tree paired with the theory it lives in
///
/// Trees are not self-describing; operations that need fusion rules take the
/// theory from here.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FusionTreeState {
    pub tree: FusionTree,
    pub anyon_type: AnyonType,
}

impl FusionTreeState {
    /// Pair a tree with its theory
    #[inline]
    pub fn new(tree: FusionTree, anyon_type: AnyonType) -> Self {
        Self { tree, anyon_type }
    }

    /// Validate the tree under its declared theory
    pub fn is_valid(&self) -> Result<bool> {
        self.tree.is_valid(self.anyon_type)
    }
}

/// Dimension of the fusion space of `particles` with total charge `target`
///
/// Counts the consistent intermediate-channel assignments on the canonical
/// left-associated fusion chain. Zero when the particle list cannot reach
/// `target` at all.
///
/// # Example
/// ```
/// use topoq_core::{fusion_space_dimension, AnyonType, Particle};
///
/// let sigmas = vec![Particle::Sigma; 4];
/// let dim = fusion_space_dimension(&sigmas, Particle::Vacuum, AnyonType::Ising).unwrap();
/// assert_eq!(dim, 2);
/// ```
pub fn fusion_space_dimension(
    particles: &[Particle],
    target: Particle,
    anyon_type: AnyonType,
) -> Result<usize> {
    if particles.is_empty() {
        return Err(AnyonError::validation("particles", "list must be non-empty"));
    }
    anyon_type.check_member(target)?;
    for &p in particles {
        anyon_type.check_member(p)?;
    }
    if particles.len() == 1 {
        return Ok(usize::from(particles[0] == target));
    }

    // dynamic program over the running charge of the chain
    let mut counts: Vec<(Particle, usize)> = vec![(particles[0], 1)];
    for &p in &particles[1..] {
        let mut next: Vec<(Particle, usize)> = Vec::new();
        for &(charge, n) in &counts {
            for out in anyon_type.fuse(charge, p)? {
                match next.iter_mut().find(|(q, _)| *q == out) {
                    Some((_, m)) => *m += n,
                    None => next.push((out, n)),
                }
            }
        }
        counts = next;
    }
    Ok(counts
        .into_iter()
        .find(|(q, _)| *q == target)
        .map_or(0, |(_, n)| n))
}

/// All canonical-basis fusion trees of `particles` with total charge `target`
///
/// Enumerates left-associated trees exhaustively; the result length always
/// equals [`fusion_space_dimension`] for the same arguments.
pub fn all_trees(
    particles: &[Particle],
    target: Particle,
    anyon_type: AnyonType,
) -> Result<Vec<FusionTree>> {
    if particles.is_empty() {
        return Err(AnyonError::validation("particles", "list must be non-empty"));
    }
    anyon_type.check_member(target)?;
    for &p in particles {
        anyon_type.check_member(p)?;
    }

    let mut partial: Vec<FusionTree> = vec![FusionTree::leaf(particles[0])];
    for &p in &particles[1..] {
        let mut next = Vec::new();
        for tree in &partial {
            for out in anyon_type.fuse(tree.total_charge(), p)? {
                next.push(FusionTree::fuse(tree.clone(), FusionTree::leaf(p), out));
            }
        }
        partial = next;
    }
    partial.retain(|t| t.total_charge() == target);
    Ok(partial)
}

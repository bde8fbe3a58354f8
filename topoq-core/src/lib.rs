//! Core types for the topoq topological quantum computing SDK
//!
//! This crate provides the fundamental value types for working with anyons:
//! - [`AnyonType`]: the active theory (Ising, Fibonacci, SU(2)_k)
//! - [`Particle`]: anyon labels within a theory
//! - [`FusionTree`]: persistent binary-tree basis states
//!
//! plus fusion-space enumeration, computational-basis encodings and the
//! analytic entropy/degeneracy helpers.
//!
//! # Example
//! ```
//! use topoq_core::{all_trees, fusion_space_dimension, AnyonType, Particle};
//!
//! let sigmas = vec![Particle::Sigma; 4];
//! let trees = all_trees(&sigmas, Particle::Vacuum, AnyonType::Ising).unwrap();
//! let dim = fusion_space_dimension(&sigmas, Particle::Vacuum, AnyonType::Ising).unwrap();
//! assert_eq!(trees.len(), dim);
//! ```

pub mod basis;
pub mod entropy;
pub mod error;
pub mod model;
pub mod particle;
pub mod tree;

// Re-exports for convenience
pub use basis::{from_computational_basis, qubit_channels, to_computational_basis};
pub use entropy::{ground_state_degeneracy, topological_entropy};
pub use error::{AnyonError, Result};
pub use model::{AnyonType, GOLDEN_RATIO};
pub use num_complex::Complex64;
pub use particle::Particle;
pub use tree::{all_trees, fusion_space_dimension, Branch, FusionTree, FusionTreeState, TreePath};

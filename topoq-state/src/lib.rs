//! Fusion-tree superpositions and their evolution for the topoq SDK
//!
//! This crate provides the quantum-state layer over fusion trees:
//! - [`Superposition`]: weighted fusion-tree basis states
//! - braiding and F-move evolution operators (unitary)
//! - fusion measurement with Born-rule statistics (irreversible)
//! - anyonic charge-error detection, greedy correction and code-space
//!   projection
//!
//! # Example
//! ```
//! use topoq_core::{AnyonType, FusionTree, FusionTreeState, Particle};
//! use topoq_state::{braid_adjacent_anyons, Superposition};
//!
//! let pair = FusionTree::fuse(
//!     FusionTree::leaf(Particle::Sigma),
//!     FusionTree::leaf(Particle::Sigma),
//!     Particle::Vacuum,
//! );
//! let state = FusionTreeState::new(pair, AnyonType::Ising);
//! let evolved = braid_adjacent_anyons(0, &state).unwrap();
//! assert!(evolved.is_normalized());
//! ```

pub mod correction;
pub mod error;
pub mod operations;
pub mod superposition;

// Re-exports for convenience
pub use correction::{
    correct_charge_violations, detect_charge_violations, extract_syndrome, full_correction,
    inject_charge_flip, project_to_code_space, Correction, Syndrome, Violation,
};
pub use error::{Result, StateError};
pub use operations::{
    braid_adjacent_anyons, braid_superposition, f_move, measure_fusion, sample_outcome,
    FMoveDirection, MeasurementOutcome,
};
pub use superposition::{probability, Superposition, Term, NORM_TOLERANCE};

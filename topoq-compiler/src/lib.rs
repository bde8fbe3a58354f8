//! Gate synthesis and compilation for the topoq SDK
//!
//! This crate turns qubit-level gate sequences into braid words:
//! - [`Su2Matrix`]: 2x2 unitary gate targets and braid images
//! - [`BraidRep`]: the single-qubit braid representation of a theory
//! - [`SolovayKitaev`]: deterministic approximate synthesis
//! - [`compile_gate_sequence`] / [`summarize_braid`]: gate-to-braid and
//!   braid-to-gate translation with error budgeting
//!
//! # Example
//! ```
//! use topoq_compiler::{compile_gate_sequence, QubitGate};
//! use topoq_core::AnyonType;
//!
//! let compiled =
//!     compile_gate_sequence(&[QubitGate::S(0)], 1e-3, AnyonType::Ising).unwrap();
//! assert!(compiled.gates[0].exact);
//! ```

pub mod braid_rep;
pub mod compile;
pub mod error;
pub mod gates;
pub mod matrices;
pub mod solovay_kitaev;

// Re-exports for convenience
pub use braid_rep::{base_set, BaseGate, BraidRep};
pub use compile::{
    compile_gate_sequence, summarize_braid, BraidSummary, Compilation, ErrorAccumulation,
    ErrorBudget, GateCompilation, GateToBraid, DEFAULT_BASE_DEPTH, DEFAULT_MAX_DEPTH,
    STRANDS_PER_QUBIT,
};
pub use error::{CompileError, Result};
pub use gates::QubitGate;
pub use matrices::Su2Matrix;
pub use solovay_kitaev::{find_commutator_factorization, SkResult, SolovayKitaev};

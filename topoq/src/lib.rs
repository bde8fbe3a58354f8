//! topoq: a topological quantum computing SDK
//!
//! Models computation in topological quantum systems built from anyons:
//! fusion-rule tables and F/R-symbols with pentagon/hexagon verification,
//! fusion-tree state spaces, braid-group words and their phase action,
//! superposition evolution with measurement, Solovay-Kitaev gate-to-braid
//! compilation, and anyonic charge-error correction.
//!
//! The functionality lives in focused member crates, re-exported here:
//! - [`topoq_core`]: particles, theories, fusion trees, entropy helpers
//! - [`topoq_symbols`]: F/R-symbol tables, consistency checks, caching
//! - [`topoq_braid`]: braid words and phase application
//! - [`topoq_state`]: superpositions, braiding/F-move/measurement, correction
//! - [`topoq_compiler`]: gates, Solovay-Kitaev, gate-to-braid compilation
//!
//! # Example
//! ```
//! use topoq::{AnyonType, Braid, Particle};
//!
//! // one clockwise exchange of two Ising sigmas in the vacuum channel
//! let braid = Braid::sigma(2, 0).unwrap();
//! let result = topoq::apply_braid(
//!     &braid,
//!     &[Particle::Sigma, Particle::Sigma],
//!     Particle::Vacuum,
//!     AnyonType::Ising,
//! )
//! .unwrap();
//! assert!((result.phase.arg() + std::f64::consts::PI / 8.0).abs() < 1e-12);
//! ```

pub use topoq_braid::{
    apply_braid, verify_yang_baxter, verify_yang_baxter_all_channels, Braid, BraidError,
    BraidResult, Generator,
};
pub use topoq_compiler::{
    compile_gate_sequence, summarize_braid, BraidRep, CompileError, Compilation,
    ErrorAccumulation, ErrorBudget, QubitGate, SkResult, SolovayKitaev, Su2Matrix,
};
pub use topoq_core::{
    all_trees, from_computational_basis, fusion_space_dimension, ground_state_degeneracy,
    qubit_channels, to_computational_basis, topological_entropy, AnyonError, AnyonType, Branch,
    Complex64, FusionTree, FusionTreeState, Particle, TreePath, GOLDEN_RATIO,
};
pub use topoq_state::{
    braid_adjacent_anyons, braid_superposition, correct_charge_violations,
    detect_charge_violations, extract_syndrome, f_move, full_correction, inject_charge_flip,
    measure_fusion, probability, project_to_code_space, sample_outcome, FMoveDirection,
    MeasurementOutcome, StateError, Superposition, Syndrome, Term, Violation,
};
pub use topoq_symbols::{
    symbols, validate_f_matrix, verify_hexagon, verify_theory, ConsistencyReport, FIndex,
    FMatrixData, RIndex, RMatrixData, SymbolError, SymbolTables,
};

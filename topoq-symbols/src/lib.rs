//! F-symbol and R-symbol computation for the topoq SDK
//!
//! For each supported theory this crate supplies the basis-change (F) and
//! braiding-phase (R) symbols, verifies the pentagon and hexagon consistency
//! equations, and caches the tables per theory.
//!
//! # Example
//! ```
//! use topoq_core::AnyonType;
//! use topoq_symbols::verify_theory;
//!
//! let report = verify_theory(AnyonType::Ising).unwrap();
//! assert!(report.is_consistent());
//! ```

pub mod cache;
pub mod consistency;
pub mod error;
pub mod fmatrix;
pub mod qnum;
pub mod rmatrix;

// Re-exports for convenience
pub use cache::{symbols, SymbolTables};
pub use consistency::{
    validate_f_matrix, verify_hexagon, verify_theory, ConsistencyReport, FMatrixValidation,
    TOLERANCE,
};
pub use error::{Result, SymbolError};
pub use fmatrix::{FBlock, FIndex, FMatrixData};
pub use rmatrix::{RIndex, RMatrixData};

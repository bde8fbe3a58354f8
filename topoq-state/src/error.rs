//! Error types for superposition evolution and error correction

use thiserror::Error;
use topoq_core::{AnyonError, AnyonType};
use topoq_symbols::SymbolError;

/// Errors that can occur evolving or correcting fusion-tree states
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// An underlying anyon-model error
    #[error(transparent)]
    Anyon(#[from] AnyonError),

    /// An underlying symbol-table error
    #[error(transparent)]
    Symbol(#[from] SymbolError),

    /// An anyon index outside the current anyon count
    #[error("Invalid anyon index {index}: state holds {count} anyons")]
    InvalidIndex { index: usize, count: usize },

    /// Terms from different theories in one superposition
    #[error("Mixed anyon theories in superposition: {expected} and {found}")]
    MixedTheories {
        expected: AnyonType,
        found: AnyonType,
    },

    /// An operation that requires a normalized superposition
    #[error("Superposition is not normalized: |amplitude|^2 sums to {norm_squared}")]
    NotNormalized { norm_squared: f64 },

    /// A basis tree shape the operation does not support
    #[error("Unsupported basis shape: {0}")]
    UnsupportedBasis(String),

    /// A well-formed operation that cannot make progress
    #[error("Operation failed: {0}")]
    Operation(String),
}

/// Result type for state operations
pub type Result<T> = std::result::Result<T, StateError>;

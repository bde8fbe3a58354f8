//! Error types for braid-word operations

use thiserror::Error;
use topoq_core::AnyonError;
use topoq_symbols::SymbolError;

/// Errors that can occur building or applying braids
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BraidError {
    /// An underlying anyon-model error
    #[error(transparent)]
    Anyon(#[from] AnyonError),

    /// An underlying symbol-table error
    #[error(transparent)]
    Symbol(#[from] SymbolError),

    /// A generator index outside [0, strands-2]
    #[error("Invalid generator index {index} for a braid on {strands} strands")]
    InvalidGenerator { index: usize, strands: usize },

    /// Composition of braids over different strand counts
    #[error("Strand count mismatch: {left} vs {right}")]
    StrandMismatch { left: usize, right: usize },

    /// An anyon list whose length differs from the braid's strand count
    #[error("Braid on {strands} strands applied to {actual} anyons")]
    AnyonCountMismatch { strands: usize, actual: usize },
}

/// Result type for braid operations
pub type Result<T> = std::result::Result<T, BraidError>;

//! Error types for gate synthesis and compilation

use thiserror::Error;
use topoq_braid::BraidError;
use topoq_core::AnyonError;
use topoq_symbols::SymbolError;

/// Errors that can occur compiling gates to braids
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// An underlying anyon-model error
    #[error(transparent)]
    Anyon(#[from] AnyonError),

    /// An underlying symbol-table error
    #[error(transparent)]
    Symbol(#[from] SymbolError),

    /// An underlying braid-word error
    #[error(transparent)]
    Braid(#[from] BraidError),

    /// A gate the target theory cannot compile
    #[error("Unsupported gate {gate}: {reason}")]
    UnsupportedGate { gate: String, reason: String },

    /// A theory without a two-dimensional braiding qubit
    #[error("No qubit encoding for {theory}: {reason}")]
    NoQubitEncoding { theory: String, reason: String },

    /// Malformed or out-of-range input
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },
}

impl CompileError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;

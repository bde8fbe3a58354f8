//! Error types for symbol computation and consistency checking

use thiserror::Error;
use topoq_core::AnyonError;

/// Errors that can occur computing or validating F/R-symbols
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SymbolError {
    /// An underlying anyon-model error (foreign particle, bad fusion, ...)
    #[error(transparent)]
    Anyon(#[from] AnyonError),

    /// An F-symbol index whose fusion channels are disallowed
    #[error("F-symbol index violates fusion rules: {index}")]
    InvalidFSymbol { index: String },

    /// An R-symbol index whose fusion channel is disallowed
    #[error("R-symbol index violates fusion rules: {index}")]
    InvalidRSymbol { index: String },

    /// A consistency equation exceeded tolerance
    #[error("Consistency check failed for {theory}: {detail}")]
    ConsistencyFailure { theory: String, detail: String },

    /// Hexagon verification is intentionally unimplemented for this theory
    #[error("Hexagon verification not implemented for {theory}: R gauge is unchecked against the Racah F gauge")]
    HexagonUnsupported { theory: String },
}

/// Result type for symbol operations
pub type Result<T> = std::result::Result<T, SymbolError>;

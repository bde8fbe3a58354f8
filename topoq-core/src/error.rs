//! Error types for anyon models and fusion trees

use crate::model::AnyonType;
use crate::particle::Particle;
use thiserror::Error;

/// Errors that can occur in anyon-model and fusion-tree operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnyonError {
    /// Malformed or out-of-range input
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// A well-formed operation the algorithm cannot carry out
    #[error("Unsupported operation: {0}")]
    Operation(String),

    /// A theory or conversion path that is intentionally unimplemented
    #[error("Not implemented for {theory}: {detail}")]
    NotImplemented { theory: String, detail: String },

    /// A particle used with a theory it does not belong to
    #[error("Particle {particle} does not belong to the {anyon_type} theory")]
    ForeignParticle {
        particle: Particle,
        anyon_type: AnyonType,
    },

    /// A fusion channel that the theory's fusion rules do not allow
    #[error("{left} x {right} cannot fuse to {channel} under {anyon_type}")]
    InvalidFusion {
        left: Particle,
        right: Particle,
        channel: Particle,
        anyon_type: AnyonType,
    },
}

impl AnyonError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a not-implemented error naming the offending theory
    pub fn not_implemented(theory: AnyonType, detail: impl Into<String>) -> Self {
        Self::NotImplemented {
            theory: theory.to_string(),
            detail: detail.into(),
        }
    }
}

/// Result type for anyon-model operations
pub type Result<T> = std::result::Result<T, AnyonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message() {
        let err = AnyonError::validation("genus", "must be non-negative");
        let msg = format!("{}", err);
        assert!(msg.contains("genus"));
        assert!(msg.contains("non-negative"));
    }

    #[test]
    fn test_foreign_particle_message() {
        let err = AnyonError::ForeignParticle {
            particle: Particle::Tau,
            anyon_type: AnyonType::Ising,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Ising"));
    }
}

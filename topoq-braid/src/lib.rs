//! Braid-group algebra for the topoq SDK
//!
//! Braid words are immutable values of the braid group B_n: composition
//! concatenates, inversion reverses and flips, simplification cancels
//! adjacent inverse pairs. Applying a word to an anyon list accumulates the
//! R-symbol exchange phases of its crossings.
//!
//! # Example
//! ```
//! use topoq_braid::{apply_braid, Braid};
//! use topoq_core::{AnyonType, Particle};
//!
//! let b = Braid::sigma(2, 0).unwrap();
//! let r = apply_braid(&b, &[Particle::Sigma, Particle::Sigma], Particle::Psi, AnyonType::Ising)
//!     .unwrap();
//! assert!((r.phase.norm() - 1.0).abs() < 1e-12);
//! ```

pub mod apply;
pub mod error;
pub mod word;

// Re-exports for convenience
pub use apply::{
    apply_braid, verify_yang_baxter, verify_yang_baxter_all_channels, BraidResult,
};
pub use error::{BraidError, Result};
pub use word::{Braid, Generator};

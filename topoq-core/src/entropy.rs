//! Analytic consumers of the quantum dimensions
//!
//! Topological entanglement entropy and genus-g ground-state degeneracy are
//! closed-form functions of a theory's quantum dimensions; they are exposed
//! here as read-only helpers.

use crate::error::{AnyonError, Result};
use crate::model::AnyonType;

/// Topological entanglement entropy ln(D)
///
/// D is the total quantum dimension. For Ising D = 2, so the entropy is ln 2.
pub fn topological_entropy(anyon_type: AnyonType) -> f64 {
    anyon_type.total_quantum_dimension().ln()
}

/// Ground-state degeneracy on a genus-g surface
///
/// Computed from the Verlinde-type sum over particles a of (D/d_a)^(2g-2).
/// The sum is provably a non-negative integer; the nearest integer is
/// returned. For genus 1 this is simply the number of particle types.
///
/// # Errors
/// Negative genus is a validation error.
pub fn ground_state_degeneracy(anyon_type: AnyonType, genus: i32) -> Result<u64> {
    if genus < 0 {
        return Err(AnyonError::validation("genus", "must be non-negative"));
    }
    let total = anyon_type.total_quantum_dimension();
    let exponent = 2.0 * f64::from(genus) - 2.0;
    let sum: f64 = anyon_type
        .particles()
        .into_iter()
        .map(|p| {
            let d = anyon_type.quantum_dimension(p).expect("own particle");
            (total / d).powf(exponent)
        })
        .sum();
    Ok(sum.round() as u64)
}

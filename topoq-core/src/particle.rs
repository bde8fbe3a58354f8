//! Anyon particle labels

use std::fmt;

/// A particle (anyon type label) within some theory
///
/// A `Particle` is only meaningful paired with an [`AnyonType`]; the model
/// rejects particles used with a theory they do not belong to. Spins for the
/// SU(2)_k family are stored doubled (`twice_j = 2j`) so that equality and
/// hashing stay exact.
///
/// [`AnyonType`]: crate::model::AnyonType
///
/// # Example
/// ```
/// use topoq_core::Particle;
///
/// let sigma = Particle::Sigma;
/// let half = Particle::spin_half(3);
/// assert!(!sigma.is_vacuum());
/// assert_eq!(half, Particle::Spin { twice_j: 1, level: 3 });
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Particle {
    /// Trivial charge (Ising and Fibonacci)
    Vacuum,
    /// Ising non-abelian anyon
    Sigma,
    /// Ising fermion
    Psi,
    /// Fibonacci anyon
    Tau,
    /// SU(2)_k spin-j particle, spin stored doubled
    Spin { twice_j: u8, level: u8 },
}

impl Particle {
    /// The spin-j particle of SU(2)_k with j given as `2j`
    #[inline]
    pub const fn spin(twice_j: u8, level: u8) -> Self {
        Self::Spin { twice_j, level }
    }

    /// The spin-1/2 particle of SU(2)_k
    #[inline]
    pub const fn spin_half(level: u8) -> Self {
        Self::Spin { twice_j: 1, level }
    }

    /// Whether this particle is the trivial charge of its theory
    #[inline]
    pub const fn is_vacuum(&self) -> bool {
        matches!(self, Self::Vacuum | Self::Spin { twice_j: 0, .. })
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vacuum => write!(f, "1"),
            Self::Sigma => write!(f, "sigma"),
            Self::Psi => write!(f, "psi"),
            Self::Tau => write!(f, "tau"),
            Self::Spin { twice_j, level } => {
                if twice_j % 2 == 0 {
                    write!(f, "j={}@k={}", twice_j / 2, level)
                } else {
                    write!(f, "j={}/2@k={}", twice_j, level)
                }
            }
        }
    }
}

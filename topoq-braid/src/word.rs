//! Braid words: values of the braid group B_n
//!
//! A [`Braid`] is an ordered word of Artin generators over a fixed strand
//! count. Words are immutable values; composition, inversion and
//! simplification all return new words.

use crate::error::{BraidError, Result};
use smallvec::SmallVec;
use std::fmt;

/// One Artin generator: crossing of strands `index` and `index + 1`
///
/// `clockwise` selects the over/under sense of the crossing; the inverse
/// generator is the same index with the flag flipped.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generator {
    pub index: usize,
    pub clockwise: bool,
}

impl Generator {
    /// The inverse crossing
    #[inline]
    pub fn inverse(self) -> Self {
        Self {
            index: self.index,
            clockwise: !self.clockwise,
        }
    }

    /// Far commutativity: generators commute iff their indices differ by >= 2
    #[inline]
    pub fn commutes_with(self, other: Generator) -> bool {
        self.index.abs_diff(other.index) >= 2
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clockwise {
            write!(f, "s{}", self.index + 1)
        } else {
            write!(f, "s{}^-1", self.index + 1)
        }
    }
}

/// A braid word over `strands` strands
///
/// # Example
/// ```
/// use topoq_braid::Braid;
///
/// let b = Braid::sigma(3, 0).unwrap().compose(&Braid::sigma(3, 1).unwrap()).unwrap();
/// let round_trip = b.compose(&b.inverse()).unwrap().simplify();
/// assert!(round_trip.is_identity());
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Braid {
    strands: usize,
    generators: SmallVec<[Generator; 8]>,
}

impl Braid {
    /// The identity braid on `strands` strands (at least 2)
    pub fn identity(strands: usize) -> Result<Self> {
        if strands < 2 {
            return Err(BraidError::InvalidGenerator { index: 0, strands });
        }
        Ok(Self {
            strands,
            generators: SmallVec::new(),
        })
    }

    /// The single clockwise generator sigma_i on `strands` strands
    pub fn sigma(strands: usize, index: usize) -> Result<Self> {
        Self::from_generators(strands, vec![Generator { index, clockwise: true }])
    }

    /// The single counterclockwise generator sigma_i^-1 on `strands` strands
    pub fn sigma_inv(strands: usize, index: usize) -> Result<Self> {
        Self::from_generators(strands, vec![Generator { index, clockwise: false }])
    }

    /// A braid from an explicit generator word
    ///
    /// # Errors
    /// Rejects strand counts below 2 and generator indices outside
    /// [0, strands-2].
    pub fn from_generators(strands: usize, generators: Vec<Generator>) -> Result<Self> {
        if strands < 2 {
            return Err(BraidError::InvalidGenerator { index: 0, strands });
        }
        for g in &generators {
            if g.index + 2 > strands {
                return Err(BraidError::InvalidGenerator {
                    index: g.index,
                    strands,
                });
            }
        }
        Ok(Self {
            strands,
            generators: SmallVec::from_vec(generators),
        })
    }

    /// Number of strands
    #[inline]
    pub fn strand_count(&self) -> usize {
        self.strands
    }

    /// The generator word, first-applied first
    #[inline]
    pub fn generators(&self) -> &[Generator] {
        &self.generators
    }

    /// Word length
    #[inline]
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Whether the word is empty
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.generators.is_empty()
    }

    /// Concatenate two braid words over the same strand count
    pub fn compose(&self, other: &Braid) -> Result<Braid> {
        if self.strands != other.strands {
            return Err(BraidError::StrandMismatch {
                left: self.strands,
                right: other.strands,
            });
        }
        let mut generators = self.generators.clone();
        generators.extend_from_slice(&other.generators);
        Ok(Braid {
            strands: self.strands,
            generators,
        })
    }

    /// The inverse word: reversed order, every crossing flipped
    pub fn inverse(&self) -> Braid {
        Braid {
            strands: self.strands,
            generators: self.generators.iter().rev().map(|g| g.inverse()).collect(),
        }
    }

    /// Cancel adjacent inverse pairs at the same index until no pair remains
    pub fn simplify(&self) -> Braid {
        let mut stack: SmallVec<[Generator; 8]> = SmallVec::new();
        for &g in &self.generators {
            match stack.last() {
                Some(&top) if top.index == g.index && top.clockwise != g.clockwise => {
                    stack.pop();
                }
                _ => stack.push(g),
            }
        }
        Braid {
            strands: self.strands,
            generators: stack,
        }
    }

    /// Detect the two canonical Yang-Baxter words sigma_i sigma_{i+1} sigma_i
    /// and sigma_{i+1} sigma_i sigma_{i+1}, in a single orientation
    pub fn is_yang_baxter_triple(&self) -> bool {
        let [g0, g1, g2] = match self.generators.as_slice() {
            [a, b, c] => [*a, *b, *c],
            _ => return false,
        };
        if g0.clockwise != g1.clockwise || g1.clockwise != g2.clockwise {
            return false;
        }
        g0.index == g2.index && g0.index.abs_diff(g1.index) == 1
    }
}

impl fmt::Display for Braid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return write!(f, "e");
        }
        for (i, g) in self.generators.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", g)?;
        }
        Ok(())
    }
}

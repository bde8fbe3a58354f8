//! R-symbols: phases acquired when two anyons are exchanged
//!
//! `R[ab; c]` is the phase of one clockwise exchange of `a` and `b` inside
//! fusion channel `c`; the counterclockwise exchange is its complex
//! conjugate. The Ising and Fibonacci values pair with the F tables of
//! [`crate::fmatrix`] to satisfy both hexagon equations.

use crate::error::{Result, SymbolError};
use ahash::AHashMap;
use num_complex::Complex64;
use std::f64::consts::PI;
use std::fmt;
use topoq_core::{AnyonType, Particle};

/// Index of one R-symbol R[ab; c]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RIndex {
    pub a: Particle,
    pub b: Particle,
    pub c: Particle,
}

impl fmt::Display for RIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R[{} {}; {}]", self.a, self.b, self.c)
    }
}

/// The R-symbol table of one theory
#[derive(Clone, Debug)]
pub struct RMatrixData {
    anyon_type: AnyonType,
    symbols: AHashMap<RIndex, Complex64>,
}

impl RMatrixData {
    /// Compute the R-symbols of a theory
    ///
    /// SU(2)_2 delegates to the Ising values under the spin identification
    /// (matching the F table). SU(2)_k otherwise uses
    /// R[ab; c] = (-1)^(a+b-c) exp(i pi (c(c+1) - a(a+1) - b(b+1)) / (k+2)),
    /// the exponent being fixed by the ribbon identity against the theory's
    /// topological spins.
    ///
    /// # Example
    /// ```
    /// use topoq_symbols::{RIndex, RMatrixData};
    /// use topoq_core::{AnyonType, Particle};
    ///
    /// let r = RMatrixData::compute(AnyonType::Ising).unwrap();
    /// let idx = RIndex { a: Particle::Sigma, b: Particle::Sigma, c: Particle::Vacuum };
    /// let phase = r.get(idx).unwrap();
    /// assert!((phase.arg() + std::f64::consts::PI / 8.0).abs() < 1e-12);
    /// ```
    pub fn compute(anyon_type: AnyonType) -> Result<Self> {
        let symbols = match anyon_type {
            AnyonType::Ising => ising_table(ising_labels()),
            AnyonType::Fibonacci => fibonacci_table(),
            AnyonType::SU2Level(2) => ising_table(su2_level_2_labels()),
            AnyonType::SU2Level(k) => su2_table(k)?,
        };
        Ok(Self { anyon_type, symbols })
    }

    /// The theory this table belongs to
    #[inline]
    pub fn anyon_type(&self) -> AnyonType {
        self.anyon_type
    }

    /// Number of stored (non-trivial) symbols
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the table stores no non-trivial symbols
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Look up one clockwise R-symbol
    ///
    /// # Errors
    /// Returns [`SymbolError::InvalidRSymbol`] when `a x b` cannot fuse to
    /// `c`; valid unstored channels carry the trivial phase 1 (exchanges with
    /// the vacuum are invisible).
    pub fn get(&self, idx: RIndex) -> Result<Complex64> {
        if !self.anyon_type.can_fuse(idx.a, idx.b, idx.c)? {
            return Err(SymbolError::InvalidRSymbol {
                index: idx.to_string(),
            });
        }
        Ok(self
            .symbols
            .get(&idx)
            .copied()
            .unwrap_or(Complex64::new(1.0, 0.0)))
    }

    /// One exchange phase with explicit orientation
    pub fn phase(&self, a: Particle, b: Particle, c: Particle, clockwise: bool) -> Result<Complex64> {
        let v = self.get(RIndex { a, b, c })?;
        Ok(if clockwise { v } else { v.conj() })
    }

    /// The R-symbol as a plain coefficient: 0 for disallowed channels
    pub fn coefficient(&self, idx: RIndex) -> Result<Complex64> {
        if self.anyon_type.can_fuse(idx.a, idx.b, idx.c)? {
            Ok(self
                .symbols
                .get(&idx)
                .copied()
                .unwrap_or(Complex64::new(1.0, 0.0)))
        } else {
            Ok(Complex64::new(0.0, 0.0))
        }
    }
}

struct Labels {
    one: Particle,
    sigma: Particle,
    psi: Particle,
}

fn ising_labels() -> Labels {
    Labels {
        one: Particle::Vacuum,
        sigma: Particle::Sigma,
        psi: Particle::Psi,
    }
}

fn su2_level_2_labels() -> Labels {
    Labels {
        one: Particle::spin(0, 2),
        sigma: Particle::spin(1, 2),
        psi: Particle::spin(2, 2),
    }
}

fn ising_table(labels: Labels) -> AHashMap<RIndex, Complex64> {
    let Labels { one, sigma, psi } = labels;
    let mut t = AHashMap::new();
    t.insert(
        RIndex { a: sigma, b: sigma, c: one },
        Complex64::from_polar(1.0, -PI / 8.0),
    );
    t.insert(
        RIndex { a: sigma, b: sigma, c: psi },
        Complex64::from_polar(1.0, 3.0 * PI / 8.0),
    );
    t.insert(RIndex { a: sigma, b: psi, c: sigma }, Complex64::new(0.0, -1.0));
    t.insert(RIndex { a: psi, b: sigma, c: sigma }, Complex64::new(0.0, -1.0));
    t.insert(RIndex { a: psi, b: psi, c: one }, Complex64::new(-1.0, 0.0));
    t
}

fn fibonacci_table() -> AHashMap<RIndex, Complex64> {
    let (one, tau) = (Particle::Vacuum, Particle::Tau);
    let mut t = AHashMap::new();
    t.insert(
        RIndex { a: tau, b: tau, c: one },
        Complex64::from_polar(1.0, -4.0 * PI / 5.0),
    );
    t.insert(
        RIndex { a: tau, b: tau, c: tau },
        Complex64::from_polar(1.0, 3.0 * PI / 5.0),
    );
    t
}

fn su2_table(k: u8) -> Result<AHashMap<RIndex, Complex64>> {
    let th = AnyonType::SU2Level(k);
    let particles = th.particles();
    let mut t = AHashMap::new();
    for &a in &particles {
        for &b in &particles {
            for c in th.fuse(a, b)? {
                let v = su2_r(k, a, b, c);
                if (v - Complex64::new(1.0, 0.0)).norm() > 1e-12 {
                    t.insert(RIndex { a, b, c }, v);
                }
            }
        }
    }
    Ok(t)
}

fn su2_r(k: u8, a: Particle, b: Particle, c: Particle) -> Complex64 {
    let tj = |p: Particle| match p {
        Particle::Spin { twice_j, .. } => i64::from(twice_j),
        _ => unreachable!("SU(2) table built from spin particles"),
    };
    let (ta, tb, tc) = (tj(a), tj(b), tj(c));
    let sign = if ((ta + tb - tc) / 2) % 2 == 0 { 1.0 } else { -1.0 };
    // Casimir combination c(c+1) - a(a+1) - b(b+1) in doubled units: t(t+2)/4
    let casimir = (tc * (tc + 2) - ta * (ta + 2) - tb * (tb + 2)) as f64 / 4.0;
    // exponent fixed by the ribbon identity R[ab;c] R[ba;c] = theta_c / (theta_a theta_b)
    let angle = PI * casimir / (f64::from(k) + 2.0);
    sign * Complex64::from_polar(1.0, angle)
}

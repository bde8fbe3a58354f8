//! F-symbols: basis-change coefficients between fusion-tree associations
//!
//! The convention used throughout the SDK is
//!
//! ```text
//! ((a b)_e c)_d  =  sum_f [F^{abc}_d]_{ef} (a (b c)_f)_d
//! ```
//!
//! Only non-trivial values are stored; a lookup on a valid index that is
//! absent from the table yields 1, and a lookup on a fusion-violating index
//! is an error.

use crate::error::{Result, SymbolError};
use crate::qnum::q_6j;
use ahash::AHashMap;
use num_complex::Complex64;
use std::fmt;
use topoq_core::{AnyonType, Particle};

/// Index of one F-symbol value [F^{abc}_d]_{ef}
///
/// `a`, `b`, `c` are the three fused particles, `d` their total charge,
/// `e` the (a b) channel and `f` the (b c) channel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FIndex {
    pub a: Particle,
    pub b: Particle,
    pub c: Particle,
    pub d: Particle,
    pub e: Particle,
    pub f: Particle,
}

impl fmt::Display for FIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "F[{} {} {}; {}]({}, {})",
            self.a, self.b, self.c, self.d, self.e, self.f
        )
    }
}

/// The F-symbol table of one theory
#[derive(Clone, Debug)]
pub struct FMatrixData {
    anyon_type: AnyonType,
    symbols: AHashMap<FIndex, Complex64>,
}

const SQRT_ONE_HALF: f64 = std::f64::consts::FRAC_1_SQRT_2;

impl FMatrixData {
    /// Compute the F-symbols of a theory
    ///
    /// Ising and Fibonacci use their literature values (6 and 4 non-trivial
    /// entries respectively). SU(2)_2 shares the Ising fusion rules and takes
    /// the Ising table under the spin identification j=0/1, j=1/2/sigma,
    /// j=1/psi. SU(2)_k for other k evaluates the q-deformed Racah formula
    /// over every admissible 6-tuple.
    ///
    /// # Example
    /// ```
    /// use topoq_symbols::{FIndex, FMatrixData};
    /// use topoq_core::{AnyonType, Particle};
    ///
    /// let f = FMatrixData::compute(AnyonType::Ising).unwrap();
    /// assert_eq!(f.len(), 6);
    /// let idx = FIndex {
    ///     a: Particle::Sigma, b: Particle::Sigma, c: Particle::Sigma,
    ///     d: Particle::Sigma, e: Particle::Vacuum, f: Particle::Vacuum,
    /// };
    /// let v = f.get(idx).unwrap();
    /// assert!((v.re - 0.5_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn compute(anyon_type: AnyonType) -> Result<Self> {
        let symbols = match anyon_type {
            AnyonType::Ising => ising_table(ising_particles()),
            AnyonType::Fibonacci => fibonacci_table(),
            // SU(2)_2 is the Ising fusion ring; delegate to the Ising values
            AnyonType::SU2Level(2) => ising_table(su2_level_2_particles()),
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

    /// Whether an index respects the fusion rules
    pub fn is_valid_index(&self, idx: FIndex) -> Result<bool> {
        let th = self.anyon_type;
        Ok(th.can_fuse(idx.a, idx.b, idx.e)?
            && th.can_fuse(idx.e, idx.c, idx.d)?
            && th.can_fuse(idx.b, idx.c, idx.f)?
            && th.can_fuse(idx.a, idx.f, idx.d)?)
    }

    /// Look up one F-symbol
    ///
    /// # Errors
    /// Returns [`SymbolError::InvalidFSymbol`] when the index violates the
    /// fusion rules; valid unstored indices are the trivial value 1.
    pub fn get(&self, idx: FIndex) -> Result<Complex64> {
        if !self.is_valid_index(idx)? {
            return Err(SymbolError::InvalidFSymbol {
                index: idx.to_string(),
            });
        }
        Ok(self
            .symbols
            .get(&idx)
            .copied()
            .unwrap_or(Complex64::new(1.0, 0.0)))
    }

    /// The F-symbol as a plain coefficient: 0 for fusion-violating indices
    ///
    /// This is the form the pentagon/hexagon sums and the evolution operators
    /// want, where disallowed channels simply contribute nothing.
    pub fn coefficient(&self, idx: FIndex) -> Result<Complex64> {
        if self.is_valid_index(idx)? {
            Ok(self
                .symbols
                .get(&idx)
                .copied()
                .unwrap_or(Complex64::new(1.0, 0.0)))
        } else {
            Ok(Complex64::new(0.0, 0.0))
        }
    }

    /// The F-move block for externals (a, b, c; d)
    ///
    /// Returns the (a b) channel basis, the (b c) channel basis and the
    /// matrix [F^{abc}_d] over them. The block of a multiplicity-free theory
    /// is always square.
    pub fn block(
        &self,
        a: Particle,
        b: Particle,
        c: Particle,
        d: Particle,
    ) -> Result<FBlock> {
        let th = self.anyon_type;
        let mut e_basis = Vec::new();
        for e in th.fuse(a, b)? {
            if th.can_fuse(e, c, d)? {
                e_basis.push(e);
            }
        }
        let mut f_basis = Vec::new();
        for f in th.fuse(b, c)? {
            if th.can_fuse(a, f, d)? {
                f_basis.push(f);
            }
        }
        let mut matrix = vec![vec![Complex64::new(0.0, 0.0); f_basis.len()]; e_basis.len()];
        for (i, &e) in e_basis.iter().enumerate() {
            for (j, &f) in f_basis.iter().enumerate() {
                matrix[i][j] = self.get(FIndex { a, b, c, d, e, f })?;
            }
        }
        Ok(FBlock {
            e_basis,
            f_basis,
            matrix,
        })
    }

    /// Check F . F-dagger = I for the block indexed by four external particles
    pub fn verify_unitarity(
        &self,
        a: Particle,
        b: Particle,
        c: Particle,
        d: Particle,
    ) -> Result<bool> {
        Ok(self.block(a, b, c, d)?.unitarity_deviation() < crate::consistency::TOLERANCE)
    }
}

/// One F-move block: channel bases and the matrix over them
#[derive(Clone, Debug)]
pub struct FBlock {
    pub e_basis: Vec<Particle>,
    pub f_basis: Vec<Particle>,
    pub matrix: Vec<Vec<Complex64>>,
}

impl FBlock {
    /// Max |(F F^dag - I)_{ij}| over the block; infinite for non-square blocks
    pub fn unitarity_deviation(&self) -> f64 {
        let n = self.e_basis.len();
        if n != self.f_basis.len() {
            return f64::INFINITY;
        }
        let mut max_dev = 0.0_f64;
        for i in 0..n {
            for j in 0..n {
                let mut sum = Complex64::new(0.0, 0.0);
                for l in 0..n {
                    sum += self.matrix[i][l] * self.matrix[j][l].conj();
                }
                let target = if i == j { 1.0 } else { 0.0 };
                max_dev = max_dev.max((sum - target).norm());
            }
        }
        max_dev
    }
}

/// Particle triple (vacuum-like, sigma-like, psi-like) for an Ising-shaped table
struct IsingLabels {
    one: Particle,
    sigma: Particle,
    psi: Particle,
}

fn ising_particles() -> IsingLabels {
    IsingLabels {
        one: Particle::Vacuum,
        sigma: Particle::Sigma,
        psi: Particle::Psi,
    }
}

fn su2_level_2_particles() -> IsingLabels {
    IsingLabels {
        one: Particle::spin(0, 2),
        sigma: Particle::spin(1, 2),
        psi: Particle::spin(2, 2),
    }
}

fn ising_table(labels: IsingLabels) -> AHashMap<FIndex, Complex64> {
    let IsingLabels { one, sigma, psi } = labels;
    let mut table = AHashMap::new();
    // the sigma^4 block: (1/sqrt 2) [[1, 1], [1, -1]] over channels {1, psi}
    for (e, f, v) in [
        (one, one, SQRT_ONE_HALF),
        (one, psi, SQRT_ONE_HALF),
        (psi, one, SQRT_ONE_HALF),
        (psi, psi, -SQRT_ONE_HALF),
    ] {
        table.insert(
            FIndex { a: sigma, b: sigma, c: sigma, d: sigma, e, f },
            Complex64::new(v, 0.0),
        );
    }
    // the two fermion-loop signs
    table.insert(
        FIndex { a: sigma, b: psi, c: sigma, d: psi, e: sigma, f: sigma },
        Complex64::new(-1.0, 0.0),
    );
    table.insert(
        FIndex { a: psi, b: sigma, c: psi, d: sigma, e: sigma, f: sigma },
        Complex64::new(-1.0, 0.0),
    );
    table
}

fn fibonacci_table() -> AHashMap<FIndex, Complex64> {
    use topoq_core::GOLDEN_RATIO as PHI;
    let (one, tau) = (Particle::Vacuum, Particle::Tau);
    let inv_phi = 1.0 / PHI;
    let inv_sqrt_phi = 1.0 / PHI.sqrt();
    let mut table = AHashMap::new();
    for (e, f, v) in [
        (one, one, inv_phi),
        (one, tau, inv_sqrt_phi),
        (tau, one, inv_sqrt_phi),
        (tau, tau, -inv_phi),
    ] {
        table.insert(
            FIndex { a: tau, b: tau, c: tau, d: tau, e, f },
            Complex64::new(v, 0.0),
        );
    }
    table
}

fn su2_table(k: u8) -> Result<AHashMap<FIndex, Complex64>> {
    let th = AnyonType::SU2Level(k);
    let particles = th.particles();
    let mut table = AHashMap::new();
    for &a in &particles {
        for &b in &particles {
            for &c in &particles {
                for &d in &particles {
                    for e in th.fuse(a, b)? {
                        if !th.can_fuse(e, c, d)? {
                            continue;
                        }
                        for f in th.fuse(b, c)? {
                            if !th.can_fuse(a, f, d)? {
                                continue;
                            }
                            let v = racah_f(k, a, b, c, d, e, f);
                            if (v - 1.0).abs() > 1e-12 {
                                table.insert(
                                    FIndex { a, b, c, d, e, f },
                                    Complex64::new(v, 0.0),
                                );
                            }
                        }
                    }
                }
            }
        }
    }
    Ok(table)
}

/// [F^{abc}_d]_{ef} = (-1)^(a+b+c+d) sqrt([2e+1][2f+1]) {a b e; c d f}_q
fn racah_f(
    k: u8,
    a: Particle,
    b: Particle,
    c: Particle,
    d: Particle,
    e: Particle,
    f: Particle,
) -> f64 {
    let tj = |p: Particle| match p {
        Particle::Spin { twice_j, .. } => i64::from(twice_j),
        _ => unreachable!("SU(2) table built from spin particles"),
    };
    let (ta, tb, tc, td, te, tf) = (tj(a), tj(b), tj(c), tj(d), tj(e), tj(f));
    let sign = if ((ta + tb + tc + td) / 2) % 2 == 0 {
        1.0
    } else {
        -1.0
    };
    let weight = (crate::qnum::q_int(k, te + 1) * crate::qnum::q_int(k, tf + 1)).sqrt();
    sign * weight * q_6j(k, ta, tb, te, tc, td, tf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use topoq_core::GOLDEN_RATIO as PHI;

    fn ising_idx(e: Particle, f: Particle) -> FIndex {
        FIndex {
            a: Particle::Sigma,
            b: Particle::Sigma,
            c: Particle::Sigma,
            d: Particle::Sigma,
            e,
            f,
        }
    }

    #[test]
    fn test_ising_has_exactly_six_entries() {
        let data = FMatrixData::compute(AnyonType::Ising).unwrap();
        assert_eq!(data.len(), 6);
    }

    #[test]
    fn test_ising_sigma_block_values() {
        let data = FMatrixData::compute(AnyonType::Ising).unwrap();
        let v00 = data.get(ising_idx(Particle::Vacuum, Particle::Vacuum)).unwrap();
        let v11 = data.get(ising_idx(Particle::Psi, Particle::Psi)).unwrap();
        assert_relative_eq!(v00.re, SQRT_ONE_HALF, epsilon = 1e-12);
        assert_relative_eq!(v11.re, -SQRT_ONE_HALF, epsilon = 1e-12);
    }

    #[test]
    fn test_trivial_symbol_defaults_to_one() {
        let data = FMatrixData::compute(AnyonType::Ising).unwrap();
        // F[psi psi sigma; sigma] is valid but trivial
        let idx = FIndex {
            a: Particle::Psi,
            b: Particle::Psi,
            c: Particle::Sigma,
            d: Particle::Sigma,
            e: Particle::Vacuum,
            f: Particle::Sigma,
        };
        assert_relative_eq!(data.get(idx).unwrap().re, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_index_is_an_error() {
        let data = FMatrixData::compute(AnyonType::Ising).unwrap();
        // sigma x sigma never fuses to sigma
        let idx = ising_idx(Particle::Sigma, Particle::Vacuum);
        assert!(matches!(
            data.get(idx),
            Err(SymbolError::InvalidFSymbol { .. })
        ));
        // but as a plain coefficient it contributes zero
        assert_eq!(data.coefficient(idx).unwrap(), Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_fibonacci_golden_ratio_values() {
        let data = FMatrixData::compute(AnyonType::Fibonacci).unwrap();
        let idx = |e, f| FIndex {
            a: Particle::Tau,
            b: Particle::Tau,
            c: Particle::Tau,
            d: Particle::Tau,
            e,
            f,
        };
        let v00 = data.get(idx(Particle::Vacuum, Particle::Vacuum)).unwrap();
        let v01 = data.get(idx(Particle::Vacuum, Particle::Tau)).unwrap();
        let v11 = data.get(idx(Particle::Tau, Particle::Tau)).unwrap();
        assert_relative_eq!(v00.re, 1.0 / PHI, epsilon = 1e-12);
        assert_relative_eq!(v01.re, 1.0 / PHI.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(v11.re, -1.0 / PHI, epsilon = 1e-12);
        // F[tau tau tau; 1] has the single trivial entry (tau, tau)
        let trivial = FIndex {
            a: Particle::Tau,
            b: Particle::Tau,
            c: Particle::Tau,
            d: Particle::Vacuum,
            e: Particle::Tau,
            f: Particle::Tau,
        };
        assert_relative_eq!(data.get(trivial).unwrap().re, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_su2_level_2_matches_ising_cardinality() {
        let ising = FMatrixData::compute(AnyonType::Ising).unwrap();
        let su2 = FMatrixData::compute(AnyonType::SU2Level(2)).unwrap();
        assert_eq!(ising.len(), su2.len());
    }

    #[test]
    fn test_su2_level_3_half_spin_block() {
        let data = FMatrixData::compute(AnyonType::SU2Level(3)).unwrap();
        let half = Particle::spin_half(3);
        let block = data.block(half, half, half, half).unwrap();
        assert_eq!(block.e_basis.len(), 2);
        // Racah gauge: [[-1/phi, 1/sqrt phi], [1/sqrt phi, 1/phi]]
        assert_relative_eq!(block.matrix[0][0].re, -1.0 / PHI, epsilon = 1e-12);
        assert_relative_eq!(block.matrix[0][1].re, 1.0 / PHI.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(block.matrix[1][1].re, 1.0 / PHI, epsilon = 1e-12);
        assert!(block.unitarity_deviation() < 1e-12);
    }

    #[test]
    fn test_unitarity_all_small_theories() {
        for theory in [
            AnyonType::Ising,
            AnyonType::Fibonacci,
            AnyonType::SU2Level(3),
            AnyonType::SU2Level(4),
        ] {
            let data = FMatrixData::compute(theory).unwrap();
            for a in theory.particles() {
                for b in theory.particles() {
                    for c in theory.particles() {
                        for d in theory.particles() {
                            let block = data.block(a, b, c, d).unwrap();
                            if block.e_basis.is_empty() {
                                continue;
                            }
                            assert!(
                                data.verify_unitarity(a, b, c, d).unwrap(),
                                "{theory}: F[{a} {b} {c}; {d}]"
                            );
                        }
                    }
                }
            }
        }
    }
}

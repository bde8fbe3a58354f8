//! Pentagon and hexagon consistency verification
//!
//! The pentagon equation relates the two F-move paths between the two extreme
//! associations of four anyons:
//!
//! ```text
//! [F^{pcd}_e]_{qt} [F^{abt}_e]_{ps}
//!     = sum_r [F^{abc}_q]_{pr} [F^{ard}_e]_{qs} [F^{bcd}_s]_{rt}
//! ```
//!
//! The hexagon equation ties R to F (multiplicity-free form):
//!
//! ```text
//! R[ca;e] [F^{acb}_d]_{eg} R[cb;g]
//!     = sum_f [F^{cab}_d]_{ef} R[cf;d] [F^{abc}_d]_{fg}
//! ```
//!
//! Both are checked numerically over every admissible index combination,
//! with fusion-violating coefficients contributing zero.

use crate::cache::symbols;
use crate::error::{Result, SymbolError};
use crate::fmatrix::{FIndex, FMatrixData};
use crate::rmatrix::{RIndex, RMatrixData};
use num_complex::Complex64;
use rayon::prelude::*;
use std::fmt;
use topoq_core::{AnyonType, Particle};

/// Tolerance for the exact-theory identities
pub const TOLERANCE: f64 = 1e-9;

/// Result of validating one theory's symbol tables
#[derive(Clone, Debug)]
pub struct ConsistencyReport {
    pub anyon_type: AnyonType,
    pub pentagon_max_deviation: f64,
    pub pentagon_checks: usize,
    pub unitarity_max_deviation: f64,
    pub unitarity_checks: usize,
    /// `None` when hexagon verification is unsupported for the theory
    pub hexagon_max_deviation: Option<f64>,
    pub hexagon_checks: usize,
}

impl ConsistencyReport {
    /// Whether every performed check stayed within [`TOLERANCE`]
    pub fn is_consistent(&self) -> bool {
        self.pentagon_max_deviation < TOLERANCE
            && self.unitarity_max_deviation < TOLERANCE
            && self.hexagon_max_deviation.map_or(true, |d| d < TOLERANCE)
    }
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: pentagon {:.2e} over {} checks, unitarity {:.2e} over {} blocks, ",
            self.anyon_type,
            self.pentagon_max_deviation,
            self.pentagon_checks,
            self.unitarity_max_deviation,
            self.unitarity_checks,
        )?;
        match self.hexagon_max_deviation {
            Some(d) => write!(f, "hexagon {:.2e} over {} checks", d, self.hexagon_checks),
            None => write!(f, "hexagon unsupported"),
        }
    }
}

/// Validation summary of an F table alone (pentagon + unitarity)
#[derive(Clone, Debug)]
pub struct FMatrixValidation {
    pub pentagon_max_deviation: f64,
    pub pentagon_checks: usize,
    pub unitarity_max_deviation: f64,
    pub unitarity_checks: usize,
}

/// Verify the pentagon equation and per-block unitarity of an F table
///
/// # Errors
/// Fails with [`SymbolError::ConsistencyFailure`] if either maximum deviation
/// exceeds [`TOLERANCE`].
pub fn validate_f_matrix(data: &FMatrixData) -> Result<FMatrixValidation> {
    let th = data.anyon_type();
    let (pentagon_max_deviation, pentagon_checks) = pentagon_sweep(data)?;
    let (unitarity_max_deviation, unitarity_checks) = unitarity_sweep(data)?;

    let validation = FMatrixValidation {
        pentagon_max_deviation,
        pentagon_checks,
        unitarity_max_deviation,
        unitarity_checks,
    };
    if validation.pentagon_max_deviation >= TOLERANCE {
        return Err(SymbolError::ConsistencyFailure {
            theory: th.to_string(),
            detail: format!(
                "pentagon deviation {:.3e} exceeds {TOLERANCE:.0e}",
                validation.pentagon_max_deviation
            ),
        });
    }
    if validation.unitarity_max_deviation >= TOLERANCE {
        return Err(SymbolError::ConsistencyFailure {
            theory: th.to_string(),
            detail: format!(
                "unitarity deviation {:.3e} exceeds {TOLERANCE:.0e}",
                validation.unitarity_max_deviation
            ),
        });
    }
    Ok(validation)
}

/// Verify both hexagon equations (clockwise and counterclockwise)
///
/// Returns the maximum deviation and the number of index combinations
/// checked.
///
/// # Errors
/// [`SymbolError::HexagonUnsupported`] for SU(2)_k with k >= 3, whose
/// R-symbol gauge is not checked against the Racah F gauge.
pub fn verify_hexagon(f: &FMatrixData, r: &RMatrixData) -> Result<(f64, usize)> {
    let th = f.anyon_type();
    if let AnyonType::SU2Level(k) = th {
        if k >= 3 {
            return Err(SymbolError::HexagonUnsupported {
                theory: th.to_string(),
            });
        }
    }
    hexagon_sweep(f, r)
}

/// End-to-end consistency verification of one theory
pub fn verify_theory(anyon_type: AnyonType) -> Result<ConsistencyReport> {
    let tables = symbols(anyon_type)?;
    let validation = validate_f_matrix(&tables.f)?;
    let (hexagon_max_deviation, hexagon_checks) = match verify_hexagon(&tables.f, &tables.r) {
        Ok((dev, n)) => (Some(dev), n),
        Err(SymbolError::HexagonUnsupported { .. }) => (None, 0),
        Err(e) => return Err(e),
    };
    if let Some(dev) = hexagon_max_deviation {
        if dev >= TOLERANCE {
            return Err(SymbolError::ConsistencyFailure {
                theory: anyon_type.to_string(),
                detail: format!("hexagon deviation {dev:.3e} exceeds {TOLERANCE:.0e}"),
            });
        }
    }
    Ok(ConsistencyReport {
        anyon_type,
        pentagon_max_deviation: validation.pentagon_max_deviation,
        pentagon_checks: validation.pentagon_checks,
        unitarity_max_deviation: validation.unitarity_max_deviation,
        unitarity_checks: validation.unitarity_checks,
        hexagon_max_deviation,
        hexagon_checks,
    })
}

fn pentagon_sweep(data: &FMatrixData) -> Result<(f64, usize)> {
    let th = data.anyon_type();
    let particles = th.particles();

    // the 5-tuple sweep is |particles|^5 checks; spread the outermost index
    let results: Vec<Result<(f64, usize)>> = particles
        .par_iter()
        .map(|&a| pentagon_sweep_fixed_a(data, a, &particles))
        .collect();

    let mut max_dev = 0.0_f64;
    let mut checks = 0;
    for r in results {
        let (dev, n) = r?;
        max_dev = max_dev.max(dev);
        checks += n;
    }
    Ok((max_dev, checks))
}

fn pentagon_sweep_fixed_a(
    data: &FMatrixData,
    a: Particle,
    particles: &[Particle],
) -> Result<(f64, usize)> {
    let th = data.anyon_type();
    let mut max_dev = 0.0_f64;
    let mut checks = 0;
    for &b in particles {
        for &c in particles {
            for &d in particles {
                for &e in particles {
                    for p in th.fuse(a, b)? {
                        for q in th.fuse(p, c)? {
                            if !th.can_fuse(q, d, e)? {
                                continue;
                            }
                            for t in th.fuse(c, d)? {
                                for s in th.fuse(b, t)? {
                                    if !th.can_fuse(a, s, e)? {
                                        continue;
                                    }
                                    let lhs = data.coefficient(FIndex {
                                        a: p, b: c, c: d, d: e, e: q, f: t,
                                    })? * data.coefficient(FIndex {
                                        a, b, c: t, d: e, e: p, f: s,
                                    })?;
                                    let mut rhs = Complex64::new(0.0, 0.0);
                                    for r in th.fuse(b, c)? {
                                        rhs += data.coefficient(FIndex {
                                            a, b, c, d: q, e: p, f: r,
                                        })? * data.coefficient(FIndex {
                                            a, b: r, c: d, d: e, e: q, f: s,
                                        })? * data.coefficient(FIndex {
                                            a: b, b: c, c: d, d: s, e: r, f: t,
                                        })?;
                                    }
                                    max_dev = max_dev.max((lhs - rhs).norm());
                                    checks += 1;
                                }
                            }
                        }
                    }
                }
            }
        }
    }
    Ok((max_dev, checks))
}

fn unitarity_sweep(data: &FMatrixData) -> Result<(f64, usize)> {
    let th = data.anyon_type();
    let particles = th.particles();
    let mut max_dev = 0.0_f64;
    let mut checks = 0;
    for &a in &particles {
        for &b in &particles {
            for &c in &particles {
                for &d in &particles {
                    let block = data.block(a, b, c, d)?;
                    if block.e_basis.is_empty() && block.f_basis.is_empty() {
                        continue;
                    }
                    max_dev = max_dev.max(block.unitarity_deviation());
                    checks += 1;
                }
            }
        }
    }
    Ok((max_dev, checks))
}

fn hexagon_sweep(f: &FMatrixData, r: &RMatrixData) -> Result<(f64, usize)> {
    let th = f.anyon_type();
    let particles = th.particles();
    let mut max_dev = 0.0_f64;
    let mut checks = 0;
    for &a in &particles {
        for &b in &particles {
            for &c in &particles {
                for &d in &particles {
                    for e in th.fuse(a, c)? {
                        if !th.can_fuse(e, b, d)? {
                            continue;
                        }
                        for g in th.fuse(c, b)? {
                            if !th.can_fuse(a, g, d)? {
                                continue;
                            }
                            for clockwise in [true, false] {
                                let twist = |x: Particle, y: Particle, z: Particle| -> Result<Complex64> {
                                    let v = r.coefficient(RIndex { a: x, b: y, c: z })?;
                                    Ok(if clockwise { v } else { v.conj() })
                                };
                                let lhs = twist(c, a, e)?
                                    * f.coefficient(FIndex { a, b: c, c: b, d, e, f: g })?
                                    * twist(c, b, g)?;
                                let mut rhs = Complex64::new(0.0, 0.0);
                                for fch in th.fuse(a, b)? {
                                    rhs += f.coefficient(FIndex {
                                        a: c, b: a, c: b, d, e, f: fch,
                                    })? * twist(c, fch, d)?
                                        * f.coefficient(FIndex {
                                            a, b, c, d, e: fch, f: g,
                                        })?;
                                }
                                max_dev = max_dev.max((lhs - rhs).norm());
                                checks += 1;
                            }
                        }
                    }
                }
            }
        }
    }
    Ok((max_dev, checks))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pentagon_holds_for_ising_and_fibonacci() {
        for theory in [AnyonType::Ising, AnyonType::Fibonacci] {
            let data = FMatrixData::compute(theory).unwrap();
            let v = validate_f_matrix(&data).unwrap();
            assert!(v.pentagon_max_deviation < TOLERANCE, "{theory}");
            assert!(v.pentagon_checks > 0);
        }
    }

    #[test]
    fn test_pentagon_holds_for_racah_levels() {
        for k in [3u8, 4] {
            let data = FMatrixData::compute(AnyonType::SU2Level(k)).unwrap();
            let v = validate_f_matrix(&data).unwrap();
            assert!(v.pentagon_max_deviation < TOLERANCE, "k = {k}");
        }
    }

    #[test]
    fn test_hexagon_holds_where_supported() {
        for theory in [AnyonType::Ising, AnyonType::Fibonacci, AnyonType::SU2Level(2)] {
            let f = FMatrixData::compute(theory).unwrap();
            let r = RMatrixData::compute(theory).unwrap();
            let (dev, checks) = verify_hexagon(&f, &r).unwrap();
            assert!(dev < TOLERANCE, "{theory}: {dev:.3e}");
            assert!(checks > 0);
        }
    }

    #[test]
    fn test_hexagon_unsupported_for_high_levels() {
        let f = FMatrixData::compute(AnyonType::SU2Level(10)).unwrap();
        let r = RMatrixData::compute(AnyonType::SU2Level(10)).unwrap();
        assert!(matches!(
            verify_hexagon(&f, &r),
            Err(SymbolError::HexagonUnsupported { .. })
        ));
    }

    #[test]
    fn test_full_reports() {
        let report = verify_theory(AnyonType::Ising).unwrap();
        assert!(report.is_consistent());
        assert!(report.hexagon_max_deviation.is_some());

        let report = verify_theory(AnyonType::SU2Level(3)).unwrap();
        assert!(report.is_consistent());
        assert!(report.hexagon_max_deviation.is_none());

        let text = format!("{report}");
        assert!(text.contains("SU(2)_3"));
        assert!(text.contains("hexagon unsupported"));
    }
}

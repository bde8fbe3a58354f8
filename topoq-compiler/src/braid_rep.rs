//! Single-qubit braid representations and braid-word base sets
//!
//! One qubit lives in three anyons of a spin-1/2-like species whose pair
//! channel is two-dimensional. The two braid generators act as
//!
//! ```text
//! sigma_1 = diag(R[qq; x0], R[qq; x1])        (pair channel basis)
//! sigma_2 = F . sigma_1 . F-dagger            (basis-changed exchange)
//! ```
//!
//! with R and F taken from the theory's symbol tables, so the matrices stay
//! consistent with the state-level evolution operators.

use crate::error::{CompileError, Result};
use crate::matrices::{Su2Matrix, IDENTITY};
use num_complex::Complex64;
use topoq_braid::{Braid, Generator};
use topoq_core::{qubit_channels, AnyonType};
use topoq_symbols::{symbols, FIndex, RIndex};

/// The images of the two 3-strand generators under a theory's qubit encoding
#[derive(Clone, Debug)]
pub struct BraidRep {
    anyon_type: AnyonType,
    sigma_1: Su2Matrix,
    sigma_2: Su2Matrix,
}

impl BraidRep {
    /// Build the representation from the theory's symbol tables
    ///
    /// # Errors
    /// [`CompileError::NoQubitEncoding`] for theories whose pair channel is
    /// not two-dimensional (SU(2)_1).
    pub fn new(anyon_type: AnyonType) -> Result<Self> {
        let (pair, x0, x1) = qubit_channels(anyon_type).map_err(|_| {
            CompileError::NoQubitEncoding {
                theory: anyon_type.to_string(),
                reason: "the pair channel is not two-dimensional".to_string(),
            }
        })?;
        let tables = symbols(anyon_type)?;

        let r0 = tables.r.get(RIndex { a: pair, b: pair, c: x0 })?;
        let r1 = tables.r.get(RIndex { a: pair, b: pair, c: x1 })?;
        let sigma_1 = Su2Matrix::diagonal(r0, r1);

        // F block over the 3-anyon space with total charge `pair`
        let mut f = [[Complex64::new(0.0, 0.0); 2]; 2];
        for (i, &e) in [x0, x1].iter().enumerate() {
            for (j, &fc) in [x0, x1].iter().enumerate() {
                f[i][j] = tables.f.get(FIndex {
                    a: pair,
                    b: pair,
                    c: pair,
                    d: pair,
                    e,
                    f: fc,
                })?;
            }
        }
        let f = Su2Matrix(f);
        let sigma_2 = f * sigma_1 * f.adjoint();

        Ok(Self {
            anyon_type,
            sigma_1,
            sigma_2,
        })
    }

    /// The theory this representation belongs to
    #[inline]
    pub fn anyon_type(&self) -> AnyonType {
        self.anyon_type
    }

    /// Image of one generator
    pub fn generator(&self, g: Generator) -> Result<Su2Matrix> {
        let m = match g.index {
            0 => self.sigma_1,
            1 => self.sigma_2,
            _ => {
                return Err(CompileError::validation(
                    "generator",
                    format!("index {} outside the 3-strand qubit block", g.index),
                ))
            }
        };
        Ok(if g.clockwise { m } else { m.adjoint() })
    }

    /// Image of a whole 3-strand braid word
    pub fn matrix(&self, braid: &Braid) -> Result<Su2Matrix> {
        if braid.strand_count() != 3 {
            return Err(CompileError::validation(
                "braid",
                format!(
                    "qubit words live on 3 strands, got {}",
                    braid.strand_count()
                ),
            ));
        }
        let mut acc = IDENTITY;
        for &g in braid.generators() {
            acc = self.generator(g)? * acc;
        }
        Ok(acc)
    }
}

/// One base-set entry: a short braid word and its matrix image
#[derive(Clone, Debug)]
pub struct BaseGate {
    pub braid: Braid,
    pub matrix: Su2Matrix,
}

/// All distinct braid-word images up to a given word length
///
/// Words are enumerated breadth-first over {sigma_1, sigma_1^-1, sigma_2,
/// sigma_2^-1}, keeping the first (therefore shortest) word per distinct
/// matrix, so the set is deterministic.
pub fn base_set(rep: &BraidRep, base_depth: usize) -> Result<Vec<BaseGate>> {
    const DEDUP_TOLERANCE: f64 = 1e-10;

    let mut out: Vec<BaseGate> = vec![BaseGate {
        braid: Braid::identity(3)?,
        matrix: IDENTITY,
    }];
    let mut frontier: Vec<usize> = vec![0];

    for _ in 0..base_depth {
        let mut next = Vec::new();
        for &idx in &frontier {
            let parent = out[idx].clone();
            for index in 0..2 {
                for clockwise in [true, false] {
                    let g = Generator { index, clockwise };
                    let word = parent
                        .braid
                        .compose(&Braid::from_generators(3, vec![g])?)?;
                    let matrix = rep.generator(g)? * parent.matrix;
                    if out
                        .iter()
                        .any(|b| b.matrix.distance(&matrix) < DEDUP_TOLERANCE)
                    {
                        continue;
                    }
                    next.push(out.len());
                    out.push(BaseGate { braid: word, matrix });
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }
    Ok(out)
}

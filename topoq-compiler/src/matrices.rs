//! 2x2 unitary matrices for single-qubit gate targets
//!
//! [`Su2Matrix`] is the working representation of every gate target and every
//! accumulated braid effect. Distances are projective (global phase ignored)
//! because braid words realize gates only up to an overall phase.

use num_complex::Complex64;
use std::ops::Mul;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

const INV_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// A 2x2 complex matrix, unitary in all uses here
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Su2Matrix(pub [[Complex64; 2]; 2]);

/// Identity matrix
pub const IDENTITY: Su2Matrix = Su2Matrix([[ONE, ZERO], [ZERO, ONE]]);

/// Pauli-X gate matrix (NOT gate)
pub const PAULI_X: Su2Matrix = Su2Matrix([[ZERO, ONE], [ONE, ZERO]]);

/// Pauli-Y gate matrix
pub const PAULI_Y: Su2Matrix = Su2Matrix([[ZERO, NEG_I], [I, ZERO]]);

/// Pauli-Z gate matrix
pub const PAULI_Z: Su2Matrix = Su2Matrix([[ONE, ZERO], [ZERO, NEG_ONE]]);

/// Hadamard gate matrix
pub const HADAMARD: Su2Matrix = Su2Matrix([
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(INV_SQRT2, 0.0),
    ],
    [
        Complex64::new(INV_SQRT2, 0.0),
        Complex64::new(-INV_SQRT2, 0.0),
    ],
]);

/// S gate matrix (phase gate, sqrt of Z)
pub const S_GATE: Su2Matrix = Su2Matrix([[ONE, ZERO], [ZERO, I]]);

/// S-dagger gate matrix
pub const S_GATE_DAGGER: Su2Matrix = Su2Matrix([[ONE, ZERO], [ZERO, NEG_I]]);

/// T gate matrix (pi/8 gate, sqrt of S)
pub const T_GATE: Su2Matrix = Su2Matrix([
    [ONE, ZERO],
    [ZERO, Complex64::new(INV_SQRT2, INV_SQRT2)],
]);

/// T-dagger gate matrix
pub const T_GATE_DAGGER: Su2Matrix = Su2Matrix([
    [ONE, ZERO],
    [ZERO, Complex64::new(INV_SQRT2, -INV_SQRT2)],
]);

impl Su2Matrix {
    /// Diagonal matrix of two phases
    #[inline]
    pub fn diagonal(a: Complex64, b: Complex64) -> Self {
        Self([[a, ZERO], [ZERO, b]])
    }

    /// Conjugate transpose
    pub fn adjoint(&self) -> Self {
        Self([
            [self.0[0][0].conj(), self.0[1][0].conj()],
            [self.0[0][1].conj(), self.0[1][1].conj()],
        ])
    }

    /// Determinant
    pub fn determinant(&self) -> Complex64 {
        self.0[0][0] * self.0[1][1] - self.0[0][1] * self.0[1][0]
    }

    /// Trace
    pub fn trace(&self) -> Complex64 {
        self.0[0][0] + self.0[1][1]
    }

    /// Whether U U-dagger = I within `tolerance`
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        let p = *self * self.adjoint();
        let mut dev = 0.0_f64;
        for i in 0..2 {
            for j in 0..2 {
                let target = if i == j { ONE } else { ZERO };
                dev = dev.max((p.0[i][j] - target).norm());
            }
        }
        dev < tolerance
    }

    /// Rescale so the determinant becomes 1
    pub fn to_special(&self) -> Self {
        let det = self.determinant();
        let scale = Complex64::from_polar(det.norm().sqrt().recip(), -det.arg() / 2.0);
        Self([
            [self.0[0][0] * scale, self.0[0][1] * scale],
            [self.0[1][0] * scale, self.0[1][1] * scale],
        ])
    }

    /// Projective operator distance: sqrt(1 - |tr(U-dagger V)| / 2)
    ///
    /// Zero iff the matrices agree up to a global phase.
    pub fn distance(&self, other: &Su2Matrix) -> f64 {
        let overlap = (self.adjoint() * *other).trace().norm() / 2.0;
        (1.0 - overlap.min(1.0)).max(0.0).sqrt()
    }

    /// Axis-angle decomposition of an SU(2) matrix
    ///
    /// Writes U = cos(theta/2) I - i sin(theta/2) (n . sigma) and returns
    /// (theta, n). The axis of a near-identity rotation defaults to z.
    pub fn to_axis_angle(&self) -> (f64, [f64; 3]) {
        let u = self.to_special();
        let cos_half = (u.trace().re / 2.0).clamp(-1.0, 1.0);
        let theta = 2.0 * cos_half.acos();
        let sin_half = (theta / 2.0).sin();
        if sin_half.abs() < 1e-12 {
            return (theta, [0.0, 0.0, 1.0]);
        }
        let nx = -(u.0[0][1].im + u.0[1][0].im) / (2.0 * sin_half);
        let ny = (u.0[1][0].re - u.0[0][1].re) / (2.0 * sin_half);
        let nz = (u.0[1][1].im - u.0[0][0].im) / (2.0 * sin_half);
        let norm = (nx * nx + ny * ny + nz * nz).sqrt();
        if norm < 1e-12 {
            return (theta, [0.0, 0.0, 1.0]);
        }
        (theta, [nx / norm, ny / norm, nz / norm])
    }

    /// SU(2) rotation by `theta` about the unit axis `n`
    pub fn from_axis_angle(theta: f64, n: [f64; 3]) -> Self {
        let (c, s) = ((theta / 2.0).cos(), (theta / 2.0).sin());
        Self([
            [
                Complex64::new(c, -s * n[2]),
                Complex64::new(-s * n[1], -s * n[0]),
            ],
            [
                Complex64::new(s * n[1], -s * n[0]),
                Complex64::new(c, s * n[2]),
            ],
        ])
    }
}

impl Mul for Su2Matrix {
    type Output = Su2Matrix;

    fn mul(self, rhs: Su2Matrix) -> Su2Matrix {
        let mut out = [[ZERO; 2]; 2];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.0[i][0] * rhs.0[0][j] + self.0[i][1] * rhs.0[1][j];
            }
        }
        Su2Matrix(out)
    }
}

/// Rotation about X by `theta`
#[inline]
pub fn rotation_x(theta: f64) -> Su2Matrix {
    Su2Matrix::from_axis_angle(theta, [1.0, 0.0, 0.0])
}

/// Rotation about Y by `theta`
#[inline]
pub fn rotation_y(theta: f64) -> Su2Matrix {
    Su2Matrix::from_axis_angle(theta, [0.0, 1.0, 0.0])
}

/// Rotation about Z by `theta`
#[inline]
pub fn rotation_z(theta: f64) -> Su2Matrix {
    Su2Matrix::from_axis_angle(theta, [0.0, 0.0, 1.0])
}

/// Phase gate diag(1, e^(i theta))
#[inline]
pub fn phase(theta: f64) -> Su2Matrix {
    Su2Matrix::diagonal(ONE, Complex64::from_polar(1.0, theta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_pauli_algebra() {
        // X^2 = I, XY = iZ
        assert!((PAULI_X * PAULI_X).distance(&IDENTITY) < 1e-12);
        let xy = PAULI_X * PAULI_Y;
        assert_relative_eq!(xy.0[0][0].im, 1.0, epsilon = 1e-12);
        assert!(xy.distance(&PAULI_Z) < 1e-12);
    }

    #[test]
    fn test_t_squares_to_s() {
        assert!((T_GATE * T_GATE).distance(&S_GATE) < 1e-12);
        assert!((S_GATE * S_GATE).distance(&PAULI_Z) < 1e-12);
    }

    #[test]
    fn test_distance_ignores_global_phase() {
        let phased = Su2Matrix::diagonal(
            Complex64::from_polar(1.0, 0.7),
            Complex64::from_polar(1.0, 0.7),
        ) * HADAMARD;
        assert!(phased.distance(&HADAMARD) < 1e-12);
        assert!(HADAMARD.distance(&PAULI_X) > 0.1);
    }

    #[test]
    fn test_axis_angle_round_trip() {
        let cases = [
            (PI / 3.0, [1.0, 0.0, 0.0]),
            (1.1, [0.0, 1.0, 0.0]),
            (2.5, [0.6, 0.0, 0.8]),
        ];
        for (theta, axis) in cases {
            let u = Su2Matrix::from_axis_angle(theta, axis);
            assert!(u.is_unitary(1e-12));
            let (t, n) = u.to_axis_angle();
            assert_relative_eq!(t, theta, epsilon = 1e-9);
            for i in 0..3 {
                assert_relative_eq!(n[i], axis[i], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_to_special_fixes_determinant() {
        let u = S_GATE.to_special();
        let det = u.determinant();
        assert_relative_eq!(det.re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(det.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_z_matches_phase_projectively() {
        assert!(rotation_z(PI / 2.0).distance(&S_GATE) < 1e-12);
        assert!(rotation_z(PI / 4.0).distance(&T_GATE) < 1e-12);
    }
}

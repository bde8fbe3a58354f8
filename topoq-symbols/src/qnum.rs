//! q-deformed arithmetic for SU(2)_k at q = exp(i pi / (k+2))
//!
//! All spins are passed doubled (`2j` integers) so the combinatorial sums stay
//! in exact integer arithmetic; only the final trigonometric evaluations are
//! floating point. The q-integers [n] are real for the root of unity used
//! here, so every quantity in this module is an `f64`.

use std::f64::consts::PI;

/// The q-integer [n] = sin(n pi / (k+2)) / sin(pi / (k+2))
#[inline]
pub fn q_int(k: u8, n: i64) -> f64 {
    let denom = f64::from(k) + 2.0;
    (n as f64 * PI / denom).sin() / (PI / denom).sin()
}

/// The q-factorial [n]! = [1][2]...[n]; [0]! = 1
///
/// Zero for n >= k+2 (the q-integer [k+2] vanishes), which is exactly the
/// truncation the level-k Racah sum relies on.
pub fn q_fact(k: u8, n: i64) -> f64 {
    debug_assert!(n >= 0, "q-factorial of negative argument");
    (1..=n).map(|m| q_int(k, m)).product()
}

/// Whether (a, b, c) is an admissible triad at level k (doubled spins)
pub fn admissible(k: u8, ta: i64, tb: i64, tc: i64) -> bool {
    (ta + tb + tc) % 2 == 0
        && tc >= (ta - tb).abs()
        && tc <= ta + tb
        && ta + tb + tc <= 2 * i64::from(k)
}

/// The triangle coefficient Delta(a, b, c) of the Racah formula
fn triangle(k: u8, ta: i64, tb: i64, tc: i64) -> f64 {
    let x = (-ta + tb + tc) / 2;
    let y = (ta - tb + tc) / 2;
    let z = (ta + tb - tc) / 2;
    let w = (ta + tb + tc) / 2 + 1;
    (q_fact(k, x) * q_fact(k, y) * q_fact(k, z) / q_fact(k, w)).sqrt()
}

/// The q-deformed 6j symbol {a b e; c d f} via the quantum Racah sum
///
/// All four triads (a,b,e), (c,d,e), (c,b,f), (a,d,f) must be admissible;
/// inadmissible input yields 0.
pub fn q_6j(k: u8, ta: i64, tb: i64, te: i64, tc: i64, td: i64, tf: i64) -> f64 {
    if !admissible(k, ta, tb, te)
        || !admissible(k, tc, td, te)
        || !admissible(k, tc, tb, tf)
        || !admissible(k, ta, td, tf)
    {
        return 0.0;
    }

    let t1 = (ta + tb + te) / 2;
    let t2 = (tc + td + te) / 2;
    let t3 = (tc + tb + tf) / 2;
    let t4 = (ta + td + tf) / 2;
    let q1 = (ta + tb + tc + td) / 2;
    let q2 = (ta + tc + te + tf) / 2;
    let q3 = (tb + td + te + tf) / 2;

    let z_min = t1.max(t2).max(t3).max(t4);
    let z_max = q1.min(q2).min(q3);

    let mut sum = 0.0;
    for z in z_min..=z_max {
        let den = q_fact(k, z - t1)
            * q_fact(k, z - t2)
            * q_fact(k, z - t3)
            * q_fact(k, z - t4)
            * q_fact(k, q1 - z)
            * q_fact(k, q2 - z)
            * q_fact(k, q3 - z);
        if den == 0.0 {
            // truncated away together with its vanishing numerator
            continue;
        }
        let sign = if z % 2 == 0 { 1.0 } else { -1.0 };
        sum += sign * q_fact(k, z + 1) / den;
    }

    triangle(k, ta, tb, te)
        * triangle(k, tc, td, te)
        * triangle(k, tc, tb, tf)
        * triangle(k, ta, td, tf)
        * sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const PHI: f64 = 1.618033988749894848;

    #[test]
    fn test_q_integers_at_level_2() {
        // k=2: [2] = sqrt(2), [3] = 1, [4] = 0
        assert_relative_eq!(q_int(2, 1), 1.0, epsilon = 1e-12);
        assert_relative_eq!(q_int(2, 2), std::f64::consts::SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(q_int(2, 3), 1.0, epsilon = 1e-12);
        assert_relative_eq!(q_int(2, 4), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_q_integers_at_level_3() {
        // k=3: [2] = phi = [3], [4] = 1, [5] = 0
        assert_relative_eq!(q_int(3, 2), PHI, epsilon = 1e-12);
        assert_relative_eq!(q_int(3, 3), PHI, epsilon = 1e-12);
        assert_relative_eq!(q_int(3, 4), 1.0, epsilon = 1e-12);
        assert_relative_eq!(q_int(3, 5), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_admissibility_truncation() {
        // 1/2 x 1/2 -> 1 is admissible at k=2 but cut off at k=1
        assert!(admissible(2, 1, 1, 2));
        assert!(!admissible(1, 1, 1, 2));
        // parity violation
        assert!(!admissible(2, 1, 1, 1));
    }

    #[test]
    fn test_6j_level_2_half_spins() {
        // {1/2 1/2 0; 1/2 1/2 0} = -1/[2], {1/2 1/2 0; 1/2 1/2 1} = 1/[2]
        assert_relative_eq!(
            q_6j(2, 1, 1, 0, 1, 1, 0),
            -1.0 / std::f64::consts::SQRT_2,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            q_6j(2, 1, 1, 0, 1, 1, 2),
            1.0 / std::f64::consts::SQRT_2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_6j_level_3_golden_values() {
        // at k=3 the half-spin block reproduces golden-ratio weights
        assert_relative_eq!(q_6j(3, 1, 1, 0, 1, 1, 0), -1.0 / PHI, epsilon = 1e-12);
        assert_relative_eq!(q_6j(3, 1, 1, 0, 1, 1, 2), 1.0 / PHI, epsilon = 1e-12);
        assert_relative_eq!(q_6j(3, 1, 1, 2, 1, 1, 2), 1.0 / (PHI * PHI), epsilon = 1e-12);
    }

    #[test]
    fn test_6j_inadmissible_is_zero() {
        assert_eq!(q_6j(2, 1, 1, 1, 1, 1, 0), 0.0);
    }
}

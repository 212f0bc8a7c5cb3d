use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;

/// A real symmetric 2×2 matrix `| a b ; b c |`.
///
/// Only the single off-diagonal entry is stored, so the matrix is symmetric by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sym2 {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Sym2 {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn trace(&self) -> f64 {
        self.a + self.c
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.a * self.c - self.b * self.b
    }

    #[inline]
    pub fn eigenvalues(&self) -> EigenvaluePair {
        let (rt1, rt2) = sym2_eigenvalues(self.a, self.b, self.c);
        EigenvaluePair { rt1, rt2 }
    }
}

/// The two eigenvalues of a [`Sym2`].
///
/// `rt1` carries the sign of the trace and is the root of larger magnitude
/// whenever the trace is nonzero. It is *not* necessarily the algebraically
/// larger eigenvalue; use [`EigenvaluePair::sorted_descending`] when that order
/// is required.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EigenvaluePair {
    pub rt1: f64,
    pub rt2: f64,
}

impl EigenvaluePair {
    pub fn max(&self) -> f64 {
        self.rt1.max(self.rt2)
    }

    pub fn min(&self) -> f64 {
        self.rt1.min(self.rt2)
    }

    pub fn sorted_descending(self) -> Self {
        if self.rt2 > self.rt1 {
            Self {
                rt1: self.rt2,
                rt2: self.rt1,
            }
        } else {
            self
        }
    }
}

impl From<EigenvaluePair> for (f64, f64) {
    fn from(pair: EigenvaluePair) -> Self {
        (pair.rt1, pair.rt2)
    }
}

/// Computes the eigenvalues of the symmetric matrix `| a b ; b c |`.
///
/// The discriminant `sqrt((a - c)^2 + 4b^2)` is evaluated relative to its larger
/// operand so that no intermediate square exceeds the magnitude of the inputs,
/// and the second root is reconstructed from the determinant instead of from
/// `trace - rt1`, which would cancel when the roots differ widely in magnitude.
///
/// # Arguments
///
/// * `a` - The first diagonal entry.
/// * `b` - The off-diagonal entry.
/// * `c` - The second diagonal entry.
///
/// # Return
///
/// Returns `(rt1, rt2)` where `rt1` follows the sign of the trace `a + c`
/// (for a zero trace, `rt1 >= 0 >= rt2`). The function is total over finite
/// inputs; entries near `f64::MAX` may produce infinite roots.
pub fn sym2_eigenvalues(a: f64, b: f64, c: f64) -> (f64, f64) {
    let sm = a + c;
    let df = a - c;
    let adf = df.abs();
    let tb = b + b;
    let ab = tb.abs();

    let (acmx, acmn) = if a.abs() > c.abs() { (a, c) } else { (c, a) };

    let rt = if adf > ab {
        let ratio = ab / adf;
        adf * (ratio * ratio + 1.0).sqrt()
    } else if adf < ab {
        let ratio = adf / ab;
        ab * (ratio * ratio + 1.0).sqrt()
    } else {
        // Also covers adf == ab == 0.
        ab * SQRT_2
    };

    let rt1 = if sm < 0.0 {
        0.5 * (sm - rt)
    } else if sm > 0.0 {
        0.5 * (sm + rt)
    } else {
        return (0.5 * rt, -0.5 * rt);
    };

    let rt2 = (acmx / rt1) * acmn - (b / rt1) * b;
    (rt1, rt2)
}

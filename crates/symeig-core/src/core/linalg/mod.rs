//! Dense and tridiagonal symmetric eigenvalue routines.
//!
//! - [`sym2`] - the closed-form, overflow-safe eigenvalue solver for symmetric 2×2
//!   matrices. It is the terminal step of every deflation performed here.
//! - [`tridiagonal`] - implicit QL iteration on symmetric tridiagonal matrices,
//!   splitting off 1×1 and 2×2 blocks as the off-diagonal coupling vanishes.
//! - [`dense`] - validation of dense symmetric input and its reduction to
//!   tridiagonal form.

pub mod dense;
pub mod sym2;
pub mod tridiagonal;

use thiserror::Error;

/// Largest magnitude whose square, and a sum of a few such squares, stays finite.
pub(crate) fn safe_max() -> f64 {
    f64::MAX.sqrt() / 3.0
}

/// Smallest magnitude that iteration can work with before squares lose all precision.
pub(crate) fn safe_min() -> f64 {
    f64::MIN_POSITIVE.sqrt() / (f64::EPSILON * f64::EPSILON)
}

/// Returns a power of two that moves `anorm` into `[lower, upper]`, or `1.0` when it
/// already lies there or is zero. Powers of two scale and unscale exactly.
pub(crate) fn power_of_two_scale(anorm: f64, lower: f64, upper: f64) -> f64 {
    let exponent = if anorm == 0.0 || (lower..=upper).contains(&anorm) {
        return 1.0;
    } else if anorm > upper {
        (upper / anorm).log2().floor()
    } else {
        (lower / anorm).log2().ceil()
    };
    2f64.powi(exponent as i32)
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LinalgError {
    #[error("Matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("Matrix entry ({row}, {col}) is not finite: {value}")]
    NonFinite { row: usize, col: usize, value: f64 },

    #[error("Matrix is not symmetric: entries ({row}, {col}) and ({col}, {row}) differ by {deviation:e}")]
    NotSymmetric {
        row: usize,
        col: usize,
        deviation: f64,
    },

    #[error(
        "Tridiagonal dimensions do not match: {diagonal} diagonal entries require {} off-diagonal entries, got {off_diagonal}",
        .diagonal.saturating_sub(1)
    )]
    DimensionMismatch { diagonal: usize, off_diagonal: usize },

    #[error("QL iteration failed to converge after {iterations} sweeps; {unconverged} off-diagonal entries remain coupled")]
    NoConvergence { iterations: usize, unconverged: usize },
}

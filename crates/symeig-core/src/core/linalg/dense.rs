use super::tridiagonal::SymTridiagonal;
use super::{LinalgError, power_of_two_scale, safe_max, safe_min};
use nalgebra::DMatrix;
use nalgebra::linalg::SymmetricTridiagonal;
use tracing::debug;

/// Checks that `matrix` is square, finite and symmetric.
///
/// Symmetry is tested relative to the largest entry: the pair `(i, j)`, `(j, i)`
/// is accepted when `|m_ij - m_ji| <= tolerance * max|m|`.
///
/// # Errors
///
/// Returns the first violation found, scanning the lower triangle row by row.
pub fn validate_symmetric(matrix: &DMatrix<f64>, tolerance: f64) -> Result<(), LinalgError> {
    let (rows, cols) = matrix.shape();
    if rows != cols {
        return Err(LinalgError::NotSquare { rows, cols });
    }

    for row in 0..rows {
        for col in 0..cols {
            let value = matrix[(row, col)];
            if !value.is_finite() {
                return Err(LinalgError::NonFinite { row, col, value });
            }
        }
    }

    let scale = matrix.amax();
    for row in 0..rows {
        for col in 0..row {
            let deviation = (matrix[(row, col)] - matrix[(col, row)]).abs();
            if deviation > tolerance * scale {
                return Err(LinalgError::NotSymmetric {
                    row,
                    col,
                    deviation,
                });
            }
        }
    }
    Ok(())
}

/// Reduces a symmetric matrix to tridiagonal form with the same eigenvalues.
///
/// Only the lower triangle is read. Matrices up to 2×2 are already tridiagonal
/// and are copied as-is, so a 2×2 input reaches the closed-form solver with its
/// original entries; larger ones go through a Householder reduction.
///
/// The reduction sums squares of column entries, so matrices whose largest entry
/// lies outside the safe range are scaled by a power of two first and the
/// tridiagonal result is scaled back.
pub fn tridiagonalize(matrix: &DMatrix<f64>) -> Result<SymTridiagonal, LinalgError> {
    let (rows, cols) = matrix.shape();
    if rows != cols {
        return Err(LinalgError::NotSquare { rows, cols });
    }

    match rows {
        0 => SymTridiagonal::new(Vec::new(), Vec::new()),
        1 => SymTridiagonal::new(vec![matrix[(0, 0)]], Vec::new()),
        2 => SymTridiagonal::new(vec![matrix[(0, 0)], matrix[(1, 1)]], vec![matrix[(1, 0)]]),
        n => {
            // Up to n squares are summed per column.
            let scale = power_of_two_scale(matrix.amax(), safe_min(), safe_max() / n as f64);
            let scaled = if scale == 1.0 {
                matrix.clone()
            } else {
                debug!(scale, "Scaling matrix before Householder reduction.");
                matrix * scale
            };
            let (diagonal, off_diagonal) = SymmetricTridiagonal::new(scaled).unpack_tridiagonal();
            SymTridiagonal::new(
                diagonal.iter().map(|x| x / scale).collect(),
                off_diagonal.iter().map(|x| x / scale).collect(),
            )
        }
    }
}

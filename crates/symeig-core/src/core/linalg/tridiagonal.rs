use super::{LinalgError, power_of_two_scale, safe_max, safe_min};
use super::sym2::sym2_eigenvalues;
use tracing::{debug, trace};

/// A real symmetric tridiagonal matrix.
///
/// `off_diagonal[i]` couples rows `i` and `i + 1`, so a matrix of dimension `n`
/// stores `n` diagonal and `n - 1` off-diagonal entries.
#[derive(Debug, Clone, PartialEq)]
pub struct SymTridiagonal {
    diagonal: Vec<f64>,
    off_diagonal: Vec<f64>,
}

/// The outcome of reducing a [`SymTridiagonal`] to diagonal form.
#[derive(Debug, Clone, PartialEq)]
pub struct Deflation {
    /// Eigenvalues in positional order, i.e. where deflation left them on the
    /// diagonal. No sorting is applied.
    pub eigenvalues: Vec<f64>,
    /// Number of implicit QL sweeps performed.
    pub sweeps: usize,
    /// Number of isolated 2×2 blocks finished by the closed-form solver.
    pub terminal_blocks: usize,
}

struct DeflationState {
    budget: usize,
    sweeps: usize,
    terminal_blocks: usize,
}

impl SymTridiagonal {
    pub fn new(diagonal: Vec<f64>, off_diagonal: Vec<f64>) -> Result<Self, LinalgError> {
        if off_diagonal.len() != diagonal.len().saturating_sub(1) {
            return Err(LinalgError::DimensionMismatch {
                diagonal: diagonal.len(),
                off_diagonal: off_diagonal.len(),
            });
        }
        if let Some((i, &value)) = diagonal.iter().enumerate().find(|(_, x)| !x.is_finite()) {
            return Err(LinalgError::NonFinite {
                row: i,
                col: i,
                value,
            });
        }
        if let Some((i, &value)) = off_diagonal
            .iter()
            .enumerate()
            .find(|(_, x)| !x.is_finite())
        {
            return Err(LinalgError::NonFinite {
                row: i + 1,
                col: i,
                value,
            });
        }
        Ok(Self {
            diagonal,
            off_diagonal,
        })
    }

    pub fn dim(&self) -> usize {
        self.diagonal.len()
    }

    pub fn diagonal(&self) -> &[f64] {
        &self.diagonal
    }

    pub fn off_diagonal(&self) -> &[f64] {
        &self.off_diagonal
    }

    /// Computes all eigenvalues by implicit QL iteration with deflation.
    ///
    /// The matrix is first split into unreduced blocks wherever an off-diagonal
    /// entry is negligible relative to its neighbouring diagonal entries. Each
    /// block is scaled into a safe range, iterated until its coupling vanishes,
    /// and scaled back. Isolated 2×2 blocks are finished directly with
    /// [`sym2_eigenvalues`] and do not consume a sweep.
    ///
    /// # Arguments
    ///
    /// * `max_iterations_per_eigenvalue` - Sweep budget per eigenvalue; the total
    ///   budget is this value times the dimension.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::NoConvergence`] if the sweep budget is exhausted
    /// before every block has been reduced to 1×1 or 2×2.
    pub fn eigenvalues(&self, max_iterations_per_eigenvalue: usize) -> Result<Deflation, LinalgError> {
        let n = self.dim();
        let mut d = self.diagonal.clone();
        let mut e = self.off_diagonal.clone();
        // Sweeps write one slot past the active block; the trailing zero keeps that in bounds.
        e.push(0.0);

        let mut state = DeflationState {
            budget: n.saturating_mul(max_iterations_per_eigenvalue),
            sweeps: 0,
            terminal_blocks: 0,
        };

        let mut start = 0;
        while start < n {
            let mut end = start;
            while end + 1 < n && !is_negligible(e[end], d[end], d[end + 1]) {
                end += 1;
            }
            e[end] = 0.0;

            if end > start {
                let scale = block_scale(&d[start..=end], &e[start..end]);
                debug!(start, end, scale, "Deflating unreduced block.");
                if scale != 1.0 {
                    d[start..=end].iter_mut().for_each(|x| *x *= scale);
                    e[start..end].iter_mut().for_each(|x| *x *= scale);
                }

                deflate_block(&mut d, &mut e, start, end, &mut state)?;

                if scale != 1.0 {
                    d[start..=end].iter_mut().for_each(|x| *x /= scale);
                }
            }
            start = end + 1;
        }

        debug!(
            dim = n,
            sweeps = state.sweeps,
            terminal_blocks = state.terminal_blocks,
            "Tridiagonal deflation finished."
        );

        Ok(Deflation {
            eigenvalues: d,
            sweeps: state.sweeps,
            terminal_blocks: state.terminal_blocks,
        })
    }
}

#[inline]
fn is_negligible(e: f64, d1: f64, d2: f64) -> bool {
    let tst = e.abs();
    // Each term is scaled separately so diagonals near f64::MAX cannot sum to infinity.
    tst <= f64::MIN_POSITIVE || tst <= f64::EPSILON * d1.abs() + f64::EPSILON * d2.abs()
}

fn block_scale(d: &[f64], e: &[f64]) -> f64 {
    let anorm = d.iter().chain(e).fold(0.0_f64, |acc, x| acc.max(x.abs()));
    power_of_two_scale(anorm, safe_min(), safe_max())
}

fn find_split(d: &[f64], e: &mut [f64], l: usize, hi: usize) -> usize {
    let mut m = l;
    while m < hi {
        if is_negligible(e[m], d[m], d[m + 1]) {
            e[m] = 0.0;
            break;
        }
        m += 1;
    }
    m
}

fn deflate_block(
    d: &mut [f64],
    e: &mut [f64],
    lo: usize,
    hi: usize,
    state: &mut DeflationState,
) -> Result<(), LinalgError> {
    let mut l = lo;
    while l <= hi {
        loop {
            let m = find_split(d, e, l, hi);
            if m == l {
                break;
            }
            if m == l + 1 {
                let (rt1, rt2) = sym2_eigenvalues(d[l], e[l], d[l + 1]);
                trace!(index = l, rt1, rt2, "Resolved isolated 2x2 block.");
                d[l] = rt1;
                d[l + 1] = rt2;
                e[l] = 0.0;
                state.terminal_blocks += 1;
                break;
            }
            if state.sweeps >= state.budget {
                let coupled = e[..e.len() - 1].iter().filter(|x| **x != 0.0).count();
                return Err(LinalgError::NoConvergence {
                    iterations: state.sweeps,
                    unconverged: coupled,
                });
            }
            state.sweeps += 1;
            ql_sweep(d, e, l, m);
        }
        l += 1;
    }
    Ok(())
}

/// One implicitly shifted QL sweep over the unreduced block `l..=m`.
fn ql_sweep(d: &mut [f64], e: &mut [f64], l: usize, m: usize) {
    let mut g = (d[l + 1] - d[l]) / (2.0 * e[l]);
    let mut r = g.hypot(1.0);
    g = d[m] - d[l] + e[l] / (g + r.copysign(g));

    let (mut s, mut c, mut p) = (1.0, 1.0, 0.0);
    for i in (l..m).rev() {
        let f = s * e[i];
        let b = c * e[i];
        r = f.hypot(g);
        e[i + 1] = r;
        if r == 0.0 {
            // The rotation underflowed and split the block; the caller rescans.
            d[i + 1] -= p;
            e[m] = 0.0;
            return;
        }
        s = f / r;
        c = g / r;
        g = d[i + 1] - p;
        r = (d[i] - g) * s + 2.0 * c * b;
        p = s * r;
        d[i + 1] = g + p;
        g = c * r - b;
    }
    d[l] -= p;
    e[l] = g;
    e[m] = 0.0;
}

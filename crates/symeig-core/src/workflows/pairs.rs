use crate::core::linalg::sym2::{EigenvaluePair, Sym2};
use crate::engine::progress::{Progress, ProgressReporter};
use rayon::prelude::*;
use tracing::{info, instrument, warn};

// Progress is reported in chunks of this many problems to keep the callback cheap.
const REPORT_CHUNK: usize = 4096;

/// Solves many independent symmetric 2×2 eigenvalue problems in parallel.
///
/// Output order matches input order. Each pair keeps the trace-sign convention
/// of [`Sym2::eigenvalues`] unless `sorted` is set, in which case the
/// algebraically larger root comes first.
#[instrument(skip_all, name = "pairs_workflow", fields(count = matrices.len()))]
pub fn run(matrices: &[Sym2], sorted: bool, reporter: &ProgressReporter) -> Vec<EigenvaluePair> {
    let chunks = matrices.len().div_ceil(REPORT_CHUNK);
    reporter.report(Progress::TaskStart {
        total_steps: chunks as u64,
    });

    let pairs: Vec<EigenvaluePair> = matrices
        .par_chunks(REPORT_CHUNK)
        .flat_map_iter(|chunk| {
            let solved: Vec<EigenvaluePair> = chunk
                .iter()
                .map(|m| {
                    let pair = m.eigenvalues();
                    if sorted { pair.sorted_descending() } else { pair }
                })
                .collect();
            reporter.report(Progress::TaskIncrement);
            solved
        })
        .collect();
    reporter.report(Progress::TaskFinish);

    let non_finite = pairs
        .iter()
        .filter(|p| !p.rt1.is_finite() || !p.rt2.is_finite())
        .count();
    if non_finite > 0 {
        warn!(
            "{} of {} problems produced non-finite eigenvalues.",
            non_finite,
            pairs.len()
        );
    }
    info!("Solved {} symmetric 2x2 problems.", pairs.len());
    pairs
}

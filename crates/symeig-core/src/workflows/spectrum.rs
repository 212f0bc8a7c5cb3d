use crate::core::linalg::dense::{tridiagonalize, validate_symmetric};
use crate::engine::config::{SortOrder, SpectrumConfig};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use nalgebra::DMatrix;
use rayon::prelude::*;
use tracing::{debug, info, instrument};

/// The eigenvalues of a dense symmetric matrix together with run statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    pub eigenvalues: Vec<f64>,
    pub sweeps: usize,
    pub terminal_blocks: usize,
    pub trace: f64,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }

    /// Difference between the eigenvalue sum and the input trace.
    pub fn trace_residual(&self) -> f64 {
        self.eigenvalues.iter().sum::<f64>() - self.trace
    }
}

#[instrument(skip_all, name = "spectrum_workflow", fields(dim = matrix.nrows()))]
pub fn run(
    matrix: &DMatrix<f64>,
    config: &SpectrumConfig,
    reporter: &ProgressReporter,
) -> Result<Spectrum, EngineError> {
    reporter.report(Progress::PhaseStart { name: "Validation" });
    validate_symmetric(matrix, config.validation.symmetry_tolerance)?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Tridiagonal reduction",
    });
    let tridiagonal = tridiagonalize(matrix)?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart { name: "Deflation" });
    let deflation = tridiagonal.eigenvalues(config.deflation.max_iterations_per_eigenvalue)?;
    reporter.report(Progress::Deflated {
        dim: tridiagonal.dim(),
        sweeps: deflation.sweeps,
        terminal_blocks: deflation.terminal_blocks,
    });
    reporter.report(Progress::PhaseFinish);

    let mut eigenvalues = deflation.eigenvalues;
    sort_eigenvalues(&mut eigenvalues, config.sort_order);

    let spectrum = Spectrum {
        eigenvalues,
        sweeps: deflation.sweeps,
        terminal_blocks: deflation.terminal_blocks,
        trace: matrix.trace(),
    };
    debug!(
        trace_residual = spectrum.trace_residual(),
        "Spectrum assembled."
    );
    info!(
        "Computed {} eigenvalues in {} sweeps.",
        spectrum.len(),
        spectrum.sweeps
    );
    Ok(spectrum)
}

/// Computes the spectra of independent matrices in parallel.
///
/// Results are returned in input order; a failure for one matrix does not affect
/// the others.
#[instrument(skip_all, name = "spectrum_batch_workflow", fields(count = matrices.len()))]
pub fn run_batch(
    matrices: &[DMatrix<f64>],
    config: &SpectrumConfig,
    reporter: &ProgressReporter,
) -> Vec<Result<Spectrum, EngineError>> {
    reporter.report(Progress::TaskStart {
        total_steps: matrices.len() as u64,
    });
    let silent = ProgressReporter::new();
    let results: Vec<_> = matrices
        .par_iter()
        .map(|matrix| {
            let result = run(matrix, config, &silent);
            reporter.report(Progress::TaskIncrement);
            result
        })
        .collect();
    reporter.report(Progress::TaskFinish);

    let failures = results.iter().filter(|r| r.is_err()).count();
    reporter.report(Progress::BatchFinished {
        succeeded: results.len() - failures,
        failed: failures,
    });
    info!(
        "Batch finished: {} succeeded, {} failed.",
        results.len() - failures,
        failures
    );
    results
}

fn sort_eigenvalues(eigenvalues: &mut [f64], order: SortOrder) {
    match order {
        SortOrder::Ascending => eigenvalues.sort_by(f64::total_cmp),
        SortOrder::Descending => eigenvalues.sort_by(|a, b| b.total_cmp(a)),
        SortOrder::Deflation => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::linalg::LinalgError;
    use crate::engine::config::SpectrumConfigBuilder;
    use std::sync::Mutex;

    const TOLERANCE: f64 = 1e-10;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn config_with_order(order: SortOrder) -> SpectrumConfig {
        SpectrumConfigBuilder::new()
            .max_iterations_per_eigenvalue(30)
            .symmetry_tolerance(1e-12)
            .sort_order(order)
            .build()
            .unwrap()
    }

    fn water_like_hessian() -> DMatrix<f64> {
        DMatrix::from_row_slice(
            3,
            3,
            &[
                0.62, -0.05, 0.11, //
                -0.05, 0.48, -0.02, //
                0.11, -0.02, 0.17,
            ],
        )
    }

    #[test]
    fn ascending_spectrum_matches_reference_decomposition() {
        let m = water_like_hessian();
        let spectrum = run(&m, &config_with_order(SortOrder::Ascending), &ProgressReporter::new())
            .unwrap();

        let mut expected: Vec<f64> = m.symmetric_eigenvalues().iter().copied().collect();
        expected.sort_by(f64::total_cmp);

        assert_eq!(spectrum.len(), 3);
        for (x, y) in spectrum.eigenvalues.iter().zip(&expected) {
            assert!(f64_approx_equal(*x, *y), "{x} vs {y}");
        }
        assert!(spectrum.trace_residual().abs() < TOLERANCE);
    }

    #[test]
    fn descending_order_reverses_ascending_order() {
        let m = water_like_hessian();
        let reporter = ProgressReporter::new();
        let ascending = run(&m, &config_with_order(SortOrder::Ascending), &reporter).unwrap();
        let mut descending =
            run(&m, &config_with_order(SortOrder::Descending), &reporter).unwrap();
        descending.eigenvalues.reverse();
        assert_eq!(ascending.eigenvalues, descending.eigenvalues);
    }

    #[test]
    fn deflation_order_keeps_closed_form_convention_for_two_by_two() {
        let m = DMatrix::from_row_slice(2, 2, &[-4.0, 1.0, 1.0, -1.0]);
        let spectrum = run(&m, &config_with_order(SortOrder::Deflation), &ProgressReporter::new())
            .unwrap();
        let expected = crate::core::linalg::sym2::sym2_eigenvalues(-4.0, 1.0, -1.0);
        assert_eq!(spectrum.eigenvalues, vec![expected.0, expected.1]);
        assert_eq!(spectrum.sweeps, 0);
        assert_eq!(spectrum.terminal_blocks, 1);
    }

    #[test]
    fn empty_matrix_yields_empty_spectrum() {
        let spectrum = run(
            &DMatrix::zeros(0, 0),
            &SpectrumConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert!(spectrum.is_empty());
        assert_eq!(spectrum.trace, 0.0);
    }

    #[test]
    fn asymmetric_matrix_is_rejected_before_reduction() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let result = run(&m, &SpectrumConfig::default(), &ProgressReporter::new());
        assert!(matches!(
            result,
            Err(EngineError::InvalidMatrix(LinalgError::NotSymmetric { .. }))
        ));
    }

    #[test]
    fn phases_are_reported_in_order() {
        let phases = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::PhaseStart { name } = event {
                phases.lock().unwrap().push(name);
            }
        }));
        run(&water_like_hessian(), &SpectrumConfig::default(), &reporter).unwrap();
        drop(reporter);
        assert_eq!(
            phases.into_inner().unwrap(),
            vec!["Validation", "Tridiagonal reduction", "Deflation"]
        );
    }

    #[test]
    fn spectrum_is_scale_invariant_across_the_exponent_range() {
        let base = water_like_hessian();
        let config = SpectrumConfig::default();
        let reporter = ProgressReporter::new();
        let reference = run(&base, &config, &reporter).unwrap().eigenvalues;

        for exponent in (-200..=200).step_by(10) {
            let factor = 10f64.powi(exponent);
            let spectrum = run(&(&base * factor), &config, &reporter)
                .unwrap_or_else(|e| panic!("factor {factor:e} failed: {e}"));
            assert_eq!(spectrum.len(), reference.len());
            for (x, y) in spectrum.eigenvalues.iter().zip(&reference) {
                assert!(
                    f64_approx_equal(x / factor, *y),
                    "factor {factor:e}: {:?} vs {reference:?}",
                    spectrum.eigenvalues
                );
            }
        }
    }

    #[test]
    fn second_difference_spectrum_survives_extreme_magnitudes() {
        let expected = [
            2.0 - std::f64::consts::SQRT_2,
            2.0,
            2.0 + std::f64::consts::SQRT_2,
        ];
        let base = DMatrix::from_row_slice(3, 3, &[2.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0]);

        for factor in [1e200, 1e160, 1e-165, 1e-200] {
            let spectrum = run(
                &(&base * factor),
                &SpectrumConfig::default(),
                &ProgressReporter::new(),
            )
            .unwrap();
            for (x, y) in spectrum.eigenvalues.iter().zip(expected) {
                assert!(
                    f64_approx_equal(x / factor, y),
                    "factor {factor:e}: {:?}",
                    spectrum.eigenvalues
                );
            }
        }
    }

    #[test]
    fn deflation_summary_is_reported() {
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::Deflated { .. } = event {
                events.lock().unwrap().push(event);
            }
        }));
        let spectrum = run(&water_like_hessian(), &SpectrumConfig::default(), &reporter).unwrap();
        drop(reporter);

        assert_eq!(
            events.into_inner().unwrap(),
            vec![Progress::Deflated {
                dim: 3,
                sweeps: spectrum.sweeps,
                terminal_blocks: spectrum.terminal_blocks,
            }]
        );
    }

    #[test]
    fn batch_preserves_input_order_and_isolates_failures() {
        let good = water_like_hessian();
        let bad = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 5.0, 1.0]);
        let scaled = &good * 1e120;
        let matrices = vec![good.clone(), bad, scaled];

        let increments = Mutex::new(0u64);
        let summary = Mutex::new(None);
        let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
            Progress::TaskIncrement => *increments.lock().unwrap() += 1,
            Progress::BatchFinished { succeeded, failed } => {
                *summary.lock().unwrap() = Some((succeeded, failed));
            }
            _ => {}
        }));
        let results = run_batch(&matrices, &SpectrumConfig::default(), &reporter);
        drop(reporter);

        assert_eq!(results.len(), 3);
        assert!(results[1].is_err());
        let first = results[0].as_ref().unwrap();
        let third = results[2].as_ref().unwrap();
        for (x, y) in first.eigenvalues.iter().zip(&third.eigenvalues) {
            assert!(((y / 1e120) - x).abs() < TOLERANCE);
        }
        assert_eq!(increments.into_inner().unwrap(), 3);
        assert_eq!(summary.into_inner().unwrap(), Some((2, 1)));
    }
}

use super::write_output;
use crate::cli::SpectrumArgs;
use crate::config::PartialSpectrumConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use symeig::{
    core::io::{
        tabular::{DenseMatrixCsv, EigenvalueCsv},
        traits::MatrixFile,
    },
    engine::progress::ProgressReporter,
    workflows,
};
use tracing::{info, warn};

pub fn run(args: SpectrumArgs, progress_handler: &CliProgressHandler) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialSpectrumConfig::from_file(path)?,
        None => PartialSpectrumConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let final_config = partial_config.merge_with_cli(&args)?;

    info!("Loading input matrix from {:?}", &args.input);
    let matrix = DenseMatrixCsv::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;

    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let result = workflows::spectrum::run(&matrix, &final_config, &reporter);
    progress_handler.finish_and_clear();
    let spectrum = result?;

    let residual = spectrum.trace_residual();
    if residual_exceeds_tolerance(residual, matrix.amax(), matrix.nrows()) {
        warn!(
            "Eigenvalue sum differs from the trace by {:e}; the input may be badly conditioned.",
            residual
        );
    }
    info!(
        "Spectrum of a {}x{} matrix: {} sweeps, {} closed-form 2x2 blocks.",
        matrix.nrows(),
        matrix.ncols(),
        spectrum.sweeps,
        spectrum.terminal_blocks
    );

    write_output::<EigenvalueCsv>(&spectrum.eigenvalues, args.output.as_deref())
}

const TRACE_RESIDUAL_TOLERANCE: f64 = 1e-10;

// The eigenvalue sum carries rounding error proportional to the matrix norm, not to
// the trace, which may be zero for a matrix with large entries.
fn residual_exceeds_tolerance(residual: f64, amax: f64, dim: usize) -> bool {
    residual.abs() > TRACE_RESIDUAL_TOLERANCE * amax * dim as f64
}

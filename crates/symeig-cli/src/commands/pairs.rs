use super::write_output;
use crate::cli::PairsArgs;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use symeig::{
    core::io::{
        tabular::{EigenPairCsv, Sym2Csv},
        traits::MatrixFile,
    },
    engine::progress::ProgressReporter,
    workflows,
};
use tracing::info;

pub fn run(args: PairsArgs, progress_handler: &CliProgressHandler) -> Result<()> {
    info!("Loading 2x2 problems from {:?}", &args.input);
    let matrices = Sym2Csv::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;

    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let pairs = workflows::pairs::run(&matrices, args.sorted, &reporter);
    progress_handler.finish_and_clear();

    info!("Writing {} eigenvalue pairs.", pairs.len());
    write_output::<EigenPairCsv>(&pairs, args.output.as_deref())
}

pub mod pair;
pub mod pairs;
pub mod spectrum;

use crate::error::{CliError, Result};
use std::path::Path;
use symeig::core::io::traits::MatrixFile;

/// Writes `data` to `path`, or to stdout when no path is given.
pub(crate) fn write_output<F>(data: &F::Data, path: Option<&Path>) -> Result<()>
where
    F: MatrixFile,
    F::Error: Send + Sync + 'static,
{
    match path {
        Some(path) => F::write_to_path(data, path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        }),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            F::write_to(data, &mut handle)
                .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to write to stdout: {}", e)))
        }
    }
}

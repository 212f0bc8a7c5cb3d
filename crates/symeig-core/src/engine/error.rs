use super::config::ConfigError;
use crate::core::linalg::LinalgError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Invalid input matrix: {0}")]
    InvalidMatrix(LinalgError),

    #[error(
        "Eigenvalue iteration failed to converge after {iterations} sweeps ({unconverged} off-diagonal entries remain coupled)"
    )]
    Convergence { iterations: usize, unconverged: usize },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl From<LinalgError> for EngineError {
    fn from(error: LinalgError) -> Self {
        match error {
            LinalgError::NoConvergence {
                iterations,
                unconverged,
            } => EngineError::Convergence {
                iterations,
                unconverged,
            },
            other => EngineError::InvalidMatrix(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_convergence_maps_to_convergence_error() {
        let error: EngineError = LinalgError::NoConvergence {
            iterations: 90,
            unconverged: 1,
        }
        .into();
        assert_eq!(
            error,
            EngineError::Convergence {
                iterations: 90,
                unconverged: 1
            }
        );
    }

    #[test]
    fn other_linalg_errors_map_to_invalid_matrix() {
        let error: EngineError = LinalgError::NotSquare { rows: 2, cols: 3 }.into();
        assert_eq!(
            error.to_string(),
            "Invalid input matrix: Matrix must be square, got 2x3"
        );
    }
}

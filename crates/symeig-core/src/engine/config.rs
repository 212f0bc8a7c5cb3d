use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Order in which a spectrum is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
    /// Positional order as left on the diagonal by deflation.
    Deflation,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
            SortOrder::Deflation => "deflation",
        };
        f.write_str(name)
    }
}

impl FromStr for SortOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascending" => Ok(SortOrder::Ascending),
            "descending" => Ok(SortOrder::Descending),
            "deflation" => Ok(SortOrder::Deflation),
            other => Err(ConfigError::InvalidParameter {
                name: "sort_order",
                reason: format!(
                    "unknown sort order '{other}', expected 'ascending', 'descending' or 'deflation'"
                ),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeflationConfig {
    pub max_iterations_per_eigenvalue: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationConfig {
    pub symmetry_tolerance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumConfig {
    pub deflation: DeflationConfig,
    pub validation: ValidationConfig,
    pub sort_order: SortOrder,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            deflation: DeflationConfig {
                max_iterations_per_eigenvalue: 30,
            },
            validation: ValidationConfig {
                symmetry_tolerance: 1e-10,
            },
            sort_order: SortOrder::Ascending,
        }
    }
}

#[derive(Default)]
pub struct SpectrumConfigBuilder {
    max_iterations_per_eigenvalue: Option<usize>,
    symmetry_tolerance: Option<f64>,
    sort_order: Option<SortOrder>,
}

impl SpectrumConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_iterations_per_eigenvalue(mut self, iterations: usize) -> Self {
        self.max_iterations_per_eigenvalue = Some(iterations);
        self
    }
    pub fn symmetry_tolerance(mut self, tolerance: f64) -> Self {
        self.symmetry_tolerance = Some(tolerance);
        self
    }
    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    pub fn build(self) -> Result<SpectrumConfig, ConfigError> {
        let max_iterations_per_eigenvalue = self
            .max_iterations_per_eigenvalue
            .ok_or(ConfigError::MissingParameter("max_iterations_per_eigenvalue"))?;
        if max_iterations_per_eigenvalue == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_iterations_per_eigenvalue",
                reason: "must be at least 1".to_string(),
            });
        }

        let symmetry_tolerance = self
            .symmetry_tolerance
            .ok_or(ConfigError::MissingParameter("symmetry_tolerance"))?;
        if !symmetry_tolerance.is_finite() || symmetry_tolerance < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "symmetry_tolerance",
                reason: format!("must be a finite non-negative number, got {symmetry_tolerance}"),
            });
        }

        Ok(SpectrumConfig {
            deflation: DeflationConfig {
                max_iterations_per_eigenvalue,
            },
            validation: ValidationConfig { symmetry_tolerance },
            sort_order: self
                .sort_order
                .ok_or(ConfigError::MissingParameter("sort_order"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_with_all_parameters_succeeds() {
        let config = SpectrumConfigBuilder::new()
            .max_iterations_per_eigenvalue(50)
            .symmetry_tolerance(1e-8)
            .sort_order(SortOrder::Descending)
            .build()
            .unwrap();
        assert_eq!(config.deflation.max_iterations_per_eigenvalue, 50);
        assert_eq!(config.validation.symmetry_tolerance, 1e-8);
        assert_eq!(config.sort_order, SortOrder::Descending);
    }

    #[test]
    fn builder_reports_first_missing_parameter() {
        let result = SpectrumConfigBuilder::new().symmetry_tolerance(1e-8).build();
        assert_eq!(
            result,
            Err(ConfigError::MissingParameter("max_iterations_per_eigenvalue"))
        );

        let result = SpectrumConfigBuilder::new()
            .max_iterations_per_eigenvalue(30)
            .symmetry_tolerance(0.0)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("sort_order")));
    }

    #[test]
    fn builder_rejects_zero_iteration_budget() {
        let result = SpectrumConfigBuilder::new()
            .max_iterations_per_eigenvalue(0)
            .symmetry_tolerance(1e-8)
            .sort_order(SortOrder::Ascending)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "max_iterations_per_eigenvalue",
                ..
            })
        ));
    }

    #[test]
    fn builder_rejects_negative_or_nan_tolerance() {
        for tolerance in [-1e-3, f64::NAN, f64::INFINITY] {
            let result = SpectrumConfigBuilder::new()
                .max_iterations_per_eigenvalue(30)
                .symmetry_tolerance(tolerance)
                .sort_order(SortOrder::Ascending)
                .build();
            assert!(matches!(
                result,
                Err(ConfigError::InvalidParameter {
                    name: "symmetry_tolerance",
                    ..
                })
            ));
        }
    }

    #[test]
    fn sort_order_parses_case_insensitively_and_displays_kebab_case() {
        assert_eq!("Descending".parse::<SortOrder>(), Ok(SortOrder::Descending));
        assert_eq!(" deflation ".parse::<SortOrder>(), Ok(SortOrder::Deflation));
        assert!("random".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::Ascending.to_string(), "ascending");
    }

    #[test]
    fn default_config_allows_thirty_sweeps_per_eigenvalue() {
        let config = SpectrumConfig::default();
        assert_eq!(config.deflation.max_iterations_per_eigenvalue, 30);
        assert_eq!(config.sort_order, SortOrder::Ascending);
    }
}

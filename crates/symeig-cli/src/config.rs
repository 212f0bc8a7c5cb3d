use crate::cli::SpectrumArgs;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use symeig::engine::config::{SortOrder, SpectrumConfig, SpectrumConfigBuilder};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialSpectrumConfig {
    pub deflation: Option<PartialDeflationConfig>,
    pub validation: Option<PartialValidationConfig>,
    pub output: Option<PartialOutputConfig>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialDeflationConfig {
    #[serde(rename = "max-iterations-per-eigenvalue")]
    pub max_iterations_per_eigenvalue: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialValidationConfig {
    #[serde(rename = "symmetry-tolerance")]
    pub symmetry_tolerance: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialOutputConfig {
    #[serde(rename = "sort-order")]
    pub sort_order: Option<SortOrder>,
}

impl PartialSpectrumConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Resolves the final configuration. Dedicated flags win over `-S` values,
    /// which win over the file; anything still unset takes the library default.
    pub fn merge_with_cli(mut self, args: &SpectrumArgs) -> Result<SpectrumConfig> {
        self.apply_set_values(&args.set_values)?;

        let defaults = SpectrumConfig::default();
        let deflation = self.deflation.unwrap_or_default();
        let validation = self.validation.unwrap_or_default();
        let output = self.output.unwrap_or_default();

        let config = SpectrumConfigBuilder::new()
            .max_iterations_per_eigenvalue(
                args.max_iterations
                    .or(deflation.max_iterations_per_eigenvalue)
                    .unwrap_or(defaults.deflation.max_iterations_per_eigenvalue),
            )
            .symmetry_tolerance(
                args.symmetry_tolerance
                    .or(validation.symmetry_tolerance)
                    .unwrap_or(defaults.validation.symmetry_tolerance),
            )
            .sort_order(
                args.sort_order
                    .or(output.sort_order)
                    .unwrap_or(defaults.sort_order),
            )
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        debug!("Resolved spectrum configuration: {:?}", config);
        Ok(config)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let key = key.trim();
            let value_str = value_str.trim();

            match key {
                "deflation.max-iterations-per-eigenvalue" => {
                    self.deflation
                        .get_or_insert_with(Default::default)
                        .max_iterations_per_eigenvalue = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?);
                }
                "validation.symmetry-tolerance" => {
                    self.validation
                        .get_or_insert_with(Default::default)
                        .symmetry_tolerance = Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                    })?);
                }
                "output.sort-order" => {
                    self.output.get_or_insert_with(Default::default).sort_order =
                        Some(value_str.parse().map_err(|e| {
                            CliError::Config(format!("Invalid value for {}: {}", key, e))
                        })?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unknown configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

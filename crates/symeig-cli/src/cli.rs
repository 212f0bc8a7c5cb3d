use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use symeig::engine::config::SortOrder;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "symeig - Numerically stable eigenvalues of real symmetric matrices, from closed-form 2x2 roots to full spectra of Hessian and covariance matrices.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for batch computations.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the two eigenvalues of one symmetric 2x2 matrix [[A, B], [B, C]].
    Pair(PairArgs),
    /// Solve every symmetric 2x2 problem listed in a CSV file with header `a,b,c`.
    Pairs(PairsArgs),
    /// Compute the full spectrum of a dense symmetric matrix stored as CSV.
    Spectrum(SpectrumArgs),
}

/// Arguments for the `pair` subcommand.
#[derive(Args, Debug)]
pub struct PairArgs {
    /// First diagonal entry.
    #[arg(allow_negative_numbers = true, value_name = "A")]
    pub a: f64,

    /// Off-diagonal entry.
    #[arg(allow_negative_numbers = true, value_name = "B")]
    pub b: f64,

    /// Second diagonal entry.
    #[arg(allow_negative_numbers = true, value_name = "C")]
    pub c: f64,

    /// Print the algebraically larger eigenvalue first instead of the trace-dominant one.
    #[arg(long)]
    pub sorted: bool,
}

/// Arguments for the `pairs` subcommand.
#[derive(Args, Debug)]
pub struct PairsArgs {
    /// Path to the input CSV file (columns `a,b,c`).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output CSV file (columns `rt1,rt2`). Prints to stdout if omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Put the algebraically larger eigenvalue first in every row.
    #[arg(long)]
    pub sorted: bool,
}

/// Arguments for the `spectrum` subcommand.
#[derive(Args, Debug)]
pub struct SpectrumArgs {
    /// Path to the input matrix (header-less CSV, one row per line).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output CSV file (columns `index,eigenvalue`). Prints to stdout if omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Overrides ---
    /// Override the eigenvalue ordering: ascending, descending or deflation.
    #[arg(long, value_name = "ORDER")]
    pub sort_order: Option<SortOrder>,

    /// Override the QL sweep budget per eigenvalue.
    #[arg(long, value_name = "INT")]
    pub max_iterations: Option<usize>,

    /// Override the relative tolerance used when checking symmetry.
    #[arg(long, value_name = "FLOAT")]
    pub symmetry_tolerance: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S output.sort-order=descending
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

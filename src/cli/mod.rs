//! Command-line parsing for the SGD regression trainer.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! modeling/training code. Numeric ranges clap cannot express are checked when
//! the arguments are turned into a `TrainConfig`.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::domain::ModelChoice;

/// Train a linear or neural regressor with per-example SGD.
#[derive(Debug, Parser, Clone)]
#[command(name = "sgdreg", version, about = "Linear and neural regression trained by SGD")]
pub struct Cli {
    /// Which model to train.
    #[arg(value_enum)]
    pub model: ModelChoice,

    /// Number of training epochs.
    #[arg(long, default_value_t = 150)]
    pub epochs: usize,

    /// Hidden layer width (neural model only).
    #[arg(long, default_value_t = 150)]
    pub hidden_size: usize,

    /// SGD learning rate.
    #[arg(long, default_value_t = 0.001)]
    pub learning_rate: f64,

    /// Seed for every random choice in the run (data, init, shuffles).
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// CSV file with a header row; the last column is the target.
    ///
    /// Without it, a synthetic linear dataset is generated.
    #[arg(long, value_name = "CSV", env = "SGD_REGRESSION_DATA")]
    pub data: Option<PathBuf>,

    /// Number of generated samples (synthetic data only).
    #[arg(long, default_value_t = 500)]
    pub samples: usize,

    /// Number of generated features (synthetic data only).
    #[arg(long, default_value_t = 8)]
    pub features: usize,

    /// Target noise standard deviation (synthetic data only).
    #[arg(long, default_value_t = 0.1)]
    pub noise: f64,

    /// Fraction of rows held out for testing.
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Disable the terminal plots.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Write `loss.svg` (and `distance.svg` for the linear model) into this directory.
    #[arg(long, value_name = "DIR")]
    pub svg_dir: Option<PathBuf>,

    /// Export the per-epoch history to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

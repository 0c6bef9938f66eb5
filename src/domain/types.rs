//! Shared domain types.
//!
//! Datasets are stored as `nalgebra` matrices so the models can use matrix
//! products directly. Training records are serializable so they can be exported
//! to JSON after a run.

use std::path::PathBuf;

use clap::ValueEnum;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Which regression model to train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum ModelChoice {
    /// Linear model trained by SGD, tracked against the analytic solution.
    #[value(name = "linear_regression")]
    #[serde(rename = "linear_regression")]
    LinearRegression,
    /// One-hidden-layer ReLU network trained by SGD with manual backprop.
    #[value(name = "nn")]
    #[serde(rename = "nn")]
    Nn,
}

impl ModelChoice {
    pub fn display_name(self) -> &'static str {
        match self {
            ModelChoice::LinearRegression => "linear_regression",
            ModelChoice::Nn => "nn",
        }
    }

    /// The linear model learns its intercept through a constant bias column;
    /// the network has explicit bias vectors instead.
    pub fn wants_bias_column(self) -> bool {
        matches!(self, ModelChoice::LinearRegression)
    }
}

/// Parameters for the generated linear dataset used when no CSV is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticSpec {
    pub n_points: usize,
    pub n_features: usize,
    /// Standard deviation of the additive Gaussian target noise.
    pub noise: f64,
}

/// Where training data comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Csv(PathBuf),
    Synthetic(SyntheticSpec),
}

/// Normalized configuration for a single training run.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub model: ModelChoice,
    pub epochs: usize,
    pub hidden_size: usize,
    pub learning_rate: f64,
    pub seed: u64,
    pub data: DataSource,
    pub test_fraction: f64,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub svg_dir: Option<PathBuf>,
    pub export: Option<PathBuf>,
}

/// A design matrix with its targets, rows paired by index.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
}

impl Dataset {
    pub fn new(x: DMatrix<f64>, y: DVector<f64>) -> Self {
        Self { x, y }
    }

    pub fn n_points(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Rebuild the dataset from the given row indices, keeping `x` and `y` in lockstep.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            x: self.x.select_rows(rows.iter()),
            y: self.y.select_rows(rows.iter()),
        }
    }
}

/// Train/test partition with matching feature columns.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSplit {
    pub train: Dataset,
    pub test: Dataset,
}

/// Metrics recorded after one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// 1-based epoch index.
    pub epoch: usize,
    #[serde(
        serialize_with = "super::metric_serde::serialize_metric",
        deserialize_with = "super::metric_serde::deserialize_metric"
    )]
    pub train_rmse: f64,
    #[serde(
        serialize_with = "super::metric_serde::serialize_metric",
        deserialize_with = "super::metric_serde::deserialize_metric"
    )]
    pub test_rmse: f64,
    /// Euclidean distance between the linear weights and the analytic solution.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::metric_serde::serialize_optional_metric",
        deserialize_with = "super::metric_serde::deserialize_optional_metric"
    )]
    pub distance: Option<f64>,
}

/// Append-only record of a training run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub epochs: Vec<EpochMetrics>,
}

impl TrainingHistory {
    pub fn push(&mut self, metrics: EpochMetrics) {
        self.epochs.push(metrics);
    }

    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn last(&self) -> Option<&EpochMetrics> {
        self.epochs.last()
    }

    pub fn epoch_indices(&self) -> Vec<usize> {
        self.epochs.iter().map(|m| m.epoch).collect()
    }

    pub fn train_losses(&self) -> Vec<f64> {
        self.epochs.iter().map(|m| m.train_rmse).collect()
    }

    pub fn test_losses(&self) -> Vec<f64> {
        self.epochs.iter().map(|m| m.test_rmse).collect()
    }

    /// Distance series, present only when every epoch recorded one.
    pub fn distances(&self) -> Option<Vec<f64>> {
        if self.epochs.is_empty() {
            return None;
        }
        self.epochs.iter().map(|m| m.distance).collect()
    }
}

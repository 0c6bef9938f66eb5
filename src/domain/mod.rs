//! Domain types used throughout the training pipeline.
//!
//! This module defines:
//!
//! - the model choice and run configuration (`ModelChoice`, `TrainConfig`)
//! - datasets and train/test splits (`Dataset`, `DataSplit`)
//! - per-epoch training records (`EpochMetrics`, `TrainingHistory`)

pub mod metric_serde;
pub mod types;

pub use types::*;

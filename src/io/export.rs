//! Export a finished run's history to JSON.
//!
//! The file records the run settings alongside the per-epoch metrics so runs
//! can be compared later without re-training.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{ModelChoice, TrainConfig, TrainingHistory};
use crate::error::AppError;

/// Schema of the exported JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryFile {
    pub tool: String,
    pub model: ModelChoice,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_size: Option<usize>,
    pub learning_rate: f64,
    pub seed: u64,
    pub history: TrainingHistory,
}

impl HistoryFile {
    pub fn new(config: &TrainConfig, history: &TrainingHistory) -> Self {
        Self {
            tool: "sgdreg".to_string(),
            model: config.model,
            hidden_size: (config.model == ModelChoice::Nn).then_some(config.hidden_size),
            learning_rate: config.learning_rate,
            seed: config.seed,
            history: history.clone(),
        }
    }
}

/// Write the history JSON file.
pub fn write_history_json(path: &Path, config: &TrainConfig, history: &TrainingHistory) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create history JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &HistoryFile::new(config, history))
        .map_err(|e| AppError::input(format!("Failed to write history JSON: {e}")))?;

    Ok(())
}

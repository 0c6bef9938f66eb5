//! CSV ingest.
//!
//! Expected layout: a header row, then one example per line with every value
//! numeric. The last column is the regression target.

use std::fs::File;
use std::path::Path;

use nalgebra::{DMatrix, DVector};
use rand::Rng;
use tracing::info;

use super::{append_bias_column, split_train_test};
use crate::domain::{DataSplit, Dataset};
use crate::error::AppError;

/// Load a CSV file and split it into train and test sets.
pub fn load_csv<R: Rng + ?Sized>(
    path: &Path,
    add_bias: bool,
    test_fraction: f64,
    rng: &mut R,
) -> Result<DataSplit, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    let data = read_dataset(file, add_bias)?;
    info!(
        path = %path.display(),
        rows = data.n_points(),
        features = data.n_features(),
        "Loaded CSV"
    );
    split_train_test(&data, test_fraction, rng)
}

/// Parse a full dataset from any CSV reader.
pub fn read_dataset<Rd: std::io::Read>(source: Rd, add_bias: bool) -> Result<Dataset, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();
    if headers.len() < 2 {
        return Err(AppError::input(format!(
            "CSV needs at least one feature column and a target column, found {} column(s).",
            headers.len()
        )));
    }
    let n_features = headers.len() - 1;

    let mut features = Vec::new();
    let mut targets = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // Line numbers are 1-based and the header is line 1.
        let line = idx + 2;
        let record = result.map_err(|e| AppError::input(format!("CSV parse error on line {line}: {e}")))?;

        for (col, field) in record.iter().enumerate() {
            let value: f64 = field.parse().map_err(|_| {
                AppError::input(format!(
                    "Line {line}, column '{}': '{field}' is not a number.",
                    &headers[col]
                ))
            })?;
            if col < n_features {
                features.push(value);
            } else {
                targets.push(value);
            }
        }
    }

    if targets.is_empty() {
        return Err(AppError::no_data("CSV contains no data rows."));
    }

    let x = DMatrix::from_row_slice(targets.len(), n_features, &features);
    let x = if add_bias { append_bias_column(x) } else { x };
    Ok(Dataset::new(x, DVector::from_vec(targets)))
}

//! Data sources for training runs.
//!
//! - CSV files (`csv_file`): every column but the last is a feature, the last
//!   is the target
//! - generated linear data (`synthetic`) for runs without an input file
//!
//! Both produce a `DataSplit` and share the same bias-column and train/test
//! split conventions. All randomness comes from the caller's RNG.

use nalgebra::DMatrix;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::domain::{DataSource, DataSplit, Dataset};
use crate::error::AppError;
use crate::train::shuffle::permutation;

pub mod csv_file;
pub mod synthetic;

pub use csv_file::load_csv;
pub use synthetic::generate_linear;

/// The single random stream for a run.
///
/// Everything random (data generation, splitting, weight initialisation,
/// per-epoch shuffles) draws from the generator returned here, so a seed
/// fixes the whole run.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Load or generate the data described by `source`.
pub fn load<R: Rng + ?Sized>(
    source: &DataSource,
    add_bias: bool,
    test_fraction: f64,
    rng: &mut R,
) -> Result<DataSplit, AppError> {
    match source {
        DataSource::Csv(path) => load_csv(path, add_bias, test_fraction, rng),
        DataSource::Synthetic(spec) => generate_linear(spec, add_bias, test_fraction, rng),
    }
}

/// Append a constant `1.0` column as the last feature.
pub fn append_bias_column(x: DMatrix<f64>) -> DMatrix<f64> {
    let ncols = x.ncols();
    x.insert_column(ncols, 1.0)
}

/// Randomly partition `data` into train and test sets.
///
/// The test set gets `round(n · test_fraction)` rows, clamped so both sides
/// keep at least one row.
pub fn split_train_test<R: Rng + ?Sized>(
    data: &Dataset,
    test_fraction: f64,
    rng: &mut R,
) -> Result<DataSplit, AppError> {
    if !(test_fraction.is_finite() && test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(AppError::input(format!(
            "Test fraction must be in (0, 1), got {test_fraction}."
        )));
    }
    let n = data.n_points();
    if n < 2 {
        return Err(AppError::no_data(format!(
            "Need at least 2 rows to split into train and test, got {n}."
        )));
    }

    let n_test = ((n as f64 * test_fraction).round() as usize).clamp(1, n - 1);
    let order = permutation(n, rng);
    let (test_rows, train_rows) = order.split_at(n_test);

    Ok(DataSplit {
        train: data.select_rows(train_rows),
        test: data.select_rows(test_rows),
    })
}

//! Generated linear regression data.
//!
//! `y = x · w_true + intercept + ε` with features, true weights and intercept
//! drawn from `Normal(0, 1)` and `ε ~ Normal(0, noise)`.

use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::info;

use super::{append_bias_column, split_train_test};
use crate::domain::{DataSplit, Dataset, SyntheticSpec};
use crate::error::AppError;

/// Generate a linear dataset and split it into train and test sets.
pub fn generate_linear<R: Rng + ?Sized>(
    spec: &SyntheticSpec,
    add_bias: bool,
    test_fraction: f64,
    rng: &mut R,
) -> Result<DataSplit, AppError> {
    let data = generate_dataset(spec, add_bias, rng)?;
    info!(
        rows = data.n_points(),
        features = data.n_features(),
        noise = spec.noise,
        "Generated synthetic data"
    );
    split_train_test(&data, test_fraction, rng)
}

fn generate_dataset<R: Rng + ?Sized>(spec: &SyntheticSpec, add_bias: bool, rng: &mut R) -> Result<Dataset, AppError> {
    if spec.n_points < 2 {
        return Err(AppError::input("Synthetic data needs at least 2 samples."));
    }
    if spec.n_features == 0 {
        return Err(AppError::input("Synthetic data needs at least 1 feature."));
    }
    if !(spec.noise.is_finite() && spec.noise >= 0.0) {
        return Err(AppError::input(format!("Noise must be finite and >= 0, got {}.", spec.noise)));
    }

    let standard = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::numeric(format!("Feature distribution error: {e}")))?;
    let noise = Normal::new(0.0, spec.noise)
        .map_err(|e| AppError::numeric(format!("Noise distribution error: {e}")))?;

    let w_true = DVector::from_fn(spec.n_features, |_, _| standard.sample(rng));
    let intercept = standard.sample(rng);

    let x = DMatrix::from_fn(spec.n_points, spec.n_features, |_, _| standard.sample(rng));
    let mut y = &x * &w_true;
    for v in y.iter_mut() {
        *v += intercept + noise.sample(rng);
    }

    let x = if add_bias { append_bias_column(x) } else { x };
    Ok(Dataset::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::seeded_rng;
    use crate::math::solve_analytically;

    fn spec(noise: f64) -> SyntheticSpec {
        SyntheticSpec {
            n_points: 60,
            n_features: 3,
            noise,
        }
    }

    #[test]
    fn noiseless_data_is_exactly_linear() {
        let data = generate_dataset(&spec(0.0), true, &mut seeded_rng(4)).unwrap();
        assert_eq!(data.x.shape(), (60, 4));

        let w = solve_analytically(&data.x, &data.y).unwrap();
        let residual = &data.x * &w - &data.y;
        assert!(residual.amax() < 1e-8, "max residual {}", residual.amax());
    }

    #[test]
    fn split_shapes_follow_bias_flag() {
        let with_bias = generate_linear(&spec(0.1), true, 0.25, &mut seeded_rng(4)).unwrap();
        assert_eq!(with_bias.train.n_features(), 4);
        assert_eq!(with_bias.test.n_points(), 15);

        let without = generate_linear(&spec(0.1), false, 0.25, &mut seeded_rng(4)).unwrap();
        assert_eq!(without.train.n_features(), 3);
    }

    #[test]
    fn seed_determines_data() {
        let a = generate_linear(&spec(0.1), false, 0.2, &mut seeded_rng(8)).unwrap();
        let b = generate_linear(&spec(0.1), false, 0.2, &mut seeded_rng(8)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_degenerate_specs() {
        let mut rng = seeded_rng(1);
        let bad = [
            SyntheticSpec { n_points: 1, n_features: 2, noise: 0.1 },
            SyntheticSpec { n_points: 10, n_features: 0, noise: 0.1 },
            SyntheticSpec { n_points: 10, n_features: 2, noise: -1.0 },
        ];
        for s in bad {
            assert!(generate_linear(&s, false, 0.2, &mut rng).is_err(), "{s:?}");
        }
    }
}

//! Shared run pipeline: data -> analytic reference -> model -> training.
//!
//! Preparation and training are split so the caller can print the run header
//! (which needs the loaded data and the analytic solution) before the first
//! epoch starts.

use rand::rngs::StdRng;
use tracing::info;

use crate::data::{load, seeded_rng};
use crate::domain::{DataSplit, ModelChoice, TrainConfig, TrainingHistory};
use crate::error::AppError;
use crate::math::solve_analytically;
use crate::models::{LinearRegression, NeuralRegression, Regressor, UpdateOptions};
use crate::report::AnalyticSummary;
use crate::train::{EpochEvent, TrainSettings, train};

/// Everything needed to start training.
pub struct PreparedRun {
    /// The run's single random stream, already advanced past data and init.
    pub rng: StdRng,
    pub split: DataSplit,
    /// Closed-form solution (linear model only).
    pub analytic: Option<AnalyticSummary>,
    pub model: Box<dyn Regressor>,
}

/// Seed the RNG, load the data, solve the analytic reference, build the model.
pub fn prepare(config: &TrainConfig) -> Result<PreparedRun, AppError> {
    let mut rng = seeded_rng(config.seed);

    let add_bias = config.model.wants_bias_column();
    let split = load(&config.data, add_bias, config.test_fraction, &mut rng)?;
    let n_features = split.train.n_features();

    let (analytic, model): (Option<AnalyticSummary>, Box<dyn Regressor>) = match config.model {
        ModelChoice::LinearRegression => {
            let w = solve_analytically(&split.train.x, &split.train.y)?;
            let summary = AnalyticSummary::new(w, &split);
            info!(
                train_rmse = summary.train_rmse,
                test_rmse = summary.test_rmse,
                "Solved analytic reference"
            );
            (
                Some(summary),
                Box::new(LinearRegression::new(n_features)) as Box<dyn Regressor>,
            )
        }
        ModelChoice::Nn => (
            None,
            Box::new(NeuralRegression::new(n_features, config.hidden_size, &mut rng)?) as Box<dyn Regressor>,
        ),
    };

    Ok(PreparedRun {
        rng,
        split,
        analytic,
        model,
    })
}

/// Train a prepared run, reporting each epoch's progress to `on_epoch`.
pub fn train_prepared<F>(config: &TrainConfig, run: &mut PreparedRun, on_epoch: F) -> TrainingHistory
where
    F: FnMut(EpochEvent<'_>),
{
    let settings = TrainSettings {
        epochs: config.epochs,
        update: UpdateOptions {
            learning_rate: config.learning_rate,
        },
    };
    let analytic = run.analytic.as_ref().map(|a| &a.weights);

    train(
        run.model.as_mut(),
        &mut run.split,
        &settings,
        analytic,
        &mut run.rng,
        on_epoch,
    )
}

//! The training/evaluation loop.
//!
//! Each epoch:
//! 1. draw a fresh permutation and reorder the training rows (x and y together)
//! 2. run one sequential SGD sweep (`train_epoch`)
//! 3. record train and test RMSE, plus the distance to the analytic solution
//!    when one is available

use nalgebra::DVector;
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::domain::{DataSplit, EpochMetrics, TrainingHistory};
use crate::math::distance;
use crate::models::{Regressor, UpdateOptions};
use crate::train::shuffle::shuffle_rows;

/// Loop settings independent of the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainSettings {
    pub epochs: usize,
    pub update: UpdateOptions,
}

/// Progress notifications sent to the caller's observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EpochEvent<'a> {
    /// Sent before the epoch's shuffle and updates.
    Started { epoch: usize },
    /// Sent once the epoch has been evaluated.
    Finished(&'a EpochMetrics),
}

/// Train `model` for `settings.epochs` epochs.
///
/// `split.train` is reordered in place every epoch. `on_epoch` sees
/// `EpochEvent::Started` before each sweep and `EpochEvent::Finished` with the
/// metrics as soon as they are recorded.
#[instrument(level = "debug", skip_all, fields(epochs = settings.epochs))]
pub fn train<M, R, F>(
    model: &mut M,
    split: &mut DataSplit,
    settings: &TrainSettings,
    analytic: Option<&DVector<f64>>,
    rng: &mut R,
    mut on_epoch: F,
) -> TrainingHistory
where
    M: Regressor + ?Sized,
    R: Rng + ?Sized,
    F: FnMut(EpochEvent<'_>),
{
    let mut history = TrainingHistory::default();

    for epoch in 1..=settings.epochs {
        debug!(epoch, "Starting epoch");
        on_epoch(EpochEvent::Started { epoch });
        shuffle_rows(&mut split.train, rng);
        model.train_epoch(&split.train.x, &split.train.y, &settings.update);

        let train_rmse = model.evaluate(&split.train.x, &split.train.y);
        let test_rmse = model.evaluate(&split.test.x, &split.test.y);
        let distance = analytic
            .zip(model.weight_vector())
            .map(|(optimum, w)| distance(optimum, w));

        let metrics = EpochMetrics {
            epoch,
            train_rmse,
            test_rmse,
            distance,
        };
        debug!(epoch, train_rmse, test_rmse, ?distance, "Epoch finished");
        on_epoch(EpochEvent::Finished(&metrics));
        history.push(metrics);
    }

    if let Some(last) = history.last() {
        info!(
            epochs = history.len(),
            train_rmse = last.train_rmse,
            test_rmse = last.test_rmse,
            "Training finished"
        );
    }
    history
}

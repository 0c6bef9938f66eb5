//! Shared behavior of the regression models.

use nalgebra::{DMatrix, DVector};

/// Per-update configuration forwarded unchanged to every `update_weight` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateOptions {
    pub learning_rate: f64,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self { learning_rate: 0.001 }
    }
}

/// A model trained by per-example stochastic gradient descent on squared error.
pub trait Regressor {
    /// Predict one value per row of `x`.
    fn predict(&self, x: &DMatrix<f64>) -> DVector<f64>;

    /// Apply one SGD step for a single example.
    fn update_weight(&mut self, x_i: &DVector<f64>, y_i: f64, opts: &UpdateOptions);

    /// The model's weight vector, when it has exactly one.
    ///
    /// Only the linear model does; it is what gets compared against the
    /// analytic solution.
    fn weight_vector(&self) -> Option<&DVector<f64>> {
        None
    }

    /// Root-mean-squared error of the predictions for `x` against `y`.
    fn evaluate(&self, x: &DMatrix<f64>, y: &DVector<f64>) -> f64 {
        let error = self.predict(x) - y;
        (error.dot(&error) / y.len() as f64).sqrt()
    }

    /// One sequential sweep over the rows in their current order.
    ///
    /// Each update sees the parameters left by the previous one.
    fn train_epoch(&mut self, x: &DMatrix<f64>, y: &DVector<f64>, opts: &UpdateOptions) {
        for (row, &y_i) in x.row_iter().zip(y.iter()) {
            let x_i = row.transpose();
            self.update_weight(&x_i, y_i, opts);
        }
    }
}

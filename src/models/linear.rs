//! Linear regression trained by per-example gradient descent.
//!
//! Loss per example is `(x_i · w − y_i)²`. Its gradient with respect to `w` is
//! `2 · (ŷ_i − y_i) · x_i` because `∂ŷ/∂w = x_i` for a linear model.

use nalgebra::{DMatrix, DVector};

use super::regressor::{Regressor, UpdateOptions};

#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression {
    w: DVector<f64>,
}

impl LinearRegression {
    /// A model with all-zero weights.
    pub fn new(n_features: usize) -> Self {
        Self {
            w: DVector::zeros(n_features),
        }
    }

    pub fn from_weights(w: DVector<f64>) -> Self {
        Self { w }
    }

    pub fn weights(&self) -> &DVector<f64> {
        &self.w
    }

    pub fn predict_one(&self, x_i: &DVector<f64>) -> f64 {
        x_i.dot(&self.w)
    }

    /// One SGD step; returns the updated weights.
    pub fn step(&mut self, x_i: &DVector<f64>, y_i: f64, learning_rate: f64) -> &DVector<f64> {
        let grad_loss = 2.0 * (self.predict_one(x_i) - y_i);
        // w <- w - lr * grad_loss * x_i
        self.w.axpy(-learning_rate * grad_loss, x_i, 1.0);
        &self.w
    }
}

impl Regressor for LinearRegression {
    fn predict(&self, x: &DMatrix<f64>) -> DVector<f64> {
        x * &self.w
    }

    fn update_weight(&mut self, x_i: &DVector<f64>, y_i: f64, opts: &UpdateOptions) {
        self.step(x_i, y_i, opts.learning_rate);
    }

    fn weight_vector(&self) -> Option<&DVector<f64>> {
        Some(&self.w)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;

    use super::*;
    use crate::math::{distance, solve_analytically};

    #[test]
    fn starts_at_zero() {
        let model = LinearRegression::new(4);
        assert_eq!(model.weights(), &DVector::zeros(4));
    }

    #[test]
    fn step_matches_hand_computation() {
        let mut model = LinearRegression::from_weights(DVector::from_row_slice(&[1.0, 0.5]));
        let x_i = DVector::from_row_slice(&[2.0, 1.0]);
        // y_hat = 2.5, grad = 2 * (2.5 - 4.5) = -4, w -= 0.1 * -4 * x_i
        let w = model.step(&x_i, 4.5, 0.1).clone();
        assert!((w[0] - 1.8).abs() < 1e-12, "got {w}");
        assert!((w[1] - 0.9).abs() < 1e-12, "got {w}");
    }

    #[test]
    fn repeated_updates_shrink_single_example_error() {
        let mut model = LinearRegression::new(3);
        let x_i = DVector::from_row_slice(&[0.5, -1.0, 1.0]);
        let y_i = 2.0;
        let opts = UpdateOptions { learning_rate: 0.05 };

        let mut prev = (model.predict_one(&x_i) - y_i).powi(2);
        for step in 0..50 {
            model.update_weight(&x_i, y_i, &opts);
            let err = (model.predict_one(&x_i) - y_i).powi(2);
            assert!(err <= prev, "step {step}: error rose from {prev} to {err}");
            prev = err;
        }
        assert!(prev < 1e-6);
    }

    #[test]
    fn evaluate_invariant_under_lockstep_permutation() {
        let model = LinearRegression::from_weights(DVector::from_row_slice(&[0.3, -1.2, 0.7]));
        let x = DMatrix::from_row_slice(
            4,
            3,
            &[1.0, 2.0, 1.0, -1.0, 0.5, 1.0, 3.0, -2.0, 1.0, 0.0, 0.0, 1.0],
        );
        let y = DVector::from_row_slice(&[1.0, 2.0, -1.0, 0.5]);
        let order = [2, 0, 3, 1];
        let xp = x.select_rows(order.iter());
        let yp = y.select_rows(order.iter());
        assert!((model.evaluate(&x, &y) - model.evaluate(&xp, &yp)).abs() < 1e-12);
    }

    #[test]
    fn sgd_converges_to_analytic_solution() {
        // Noiseless y = 1.5 a - 2 b + 0.5, bias column last.
        let mut rng = StdRng::seed_from_u64(7);
        let rows: Vec<[f64; 3]> = (0..40)
            .map(|i| {
                let a = (i as f64 * 0.37).sin();
                let b = (i as f64 * 0.11).cos();
                [a, b, 1.0]
            })
            .collect();
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let x = DMatrix::from_row_slice(rows.len(), 3, &flat);
        let y = DVector::from_iterator(rows.len(), rows.iter().map(|r| 1.5 * r[0] - 2.0 * r[1] + 0.5));

        let analytic = solve_analytically(&x, &y).unwrap();
        let mut model = LinearRegression::new(3);
        let opts = UpdateOptions { learning_rate: 0.05 };

        let mut order: Vec<usize> = (0..rows.len()).collect();
        let start = distance(&analytic, model.weights());
        for _ in 0..400 {
            order.shuffle(&mut rng);
            let xs = x.select_rows(order.iter());
            let ys = y.select_rows(order.iter());
            model.train_epoch(&xs, &ys, &opts);
        }
        let end = distance(&analytic, model.weights());
        assert!(end < start);
        assert!(end < 1e-3, "distance to analytic solution still {end}");
    }
}

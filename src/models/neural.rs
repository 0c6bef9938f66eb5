//! Feedforward regression network with hand-written backpropagation.
//!
//! The network is a list of dense layers. Every layer except the last applies a
//! ReLU; the last layer is a single linear output unit. With the default
//! construction there are exactly two layers (`n_features → hidden → 1`), but
//! the forward and backward passes walk the layer list and work for any depth.
//!
//! Shapes follow the row-vector convention: a layer's weight matrix is
//! `inputs × outputs`, so a batch forward pass is `Z = H · W + b`.

use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::regressor::{Regressor, UpdateOptions};
use crate::error::AppError;

/// Mean of the normal distribution used for weight initialisation.
pub const INIT_MEAN: f64 = 0.1;
/// Standard deviation of the normal distribution used for weight initialisation.
pub const INIT_STD: f64 = 0.1;

/// One dense layer's parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    /// `inputs × outputs`.
    pub weights: DMatrix<f64>,
    /// One bias per output.
    pub biases: DVector<f64>,
}

impl DenseLayer {
    pub fn new(weights: DMatrix<f64>, biases: DVector<f64>) -> Self {
        Self { weights, biases }
    }

    pub fn n_inputs(&self) -> usize {
        self.weights.nrows()
    }

    pub fn n_outputs(&self) -> usize {
        self.weights.ncols()
    }
}

/// Loss gradient for one layer, shaped like the layer's parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGradient {
    pub weights: DMatrix<f64>,
    pub biases: DVector<f64>,
}

/// Intermediate values of a single-example forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardTrace {
    /// Input activation of each layer (`inputs[0]` is the example itself).
    pub inputs: Vec<DVector<f64>>,
    /// Pre-activation of each layer.
    pub pre_activations: Vec<DVector<f64>>,
    /// Scalar network output.
    pub output: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NeuralRegression {
    layers: Vec<DenseLayer>,
}

impl NeuralRegression {
    /// Build a `n_features → hidden → 1` network.
    ///
    /// Weights are drawn from `Normal(INIT_MEAN, INIT_STD)`; biases start at zero.
    pub fn new<R: Rng + ?Sized>(n_features: usize, hidden: usize, rng: &mut R) -> Result<Self, AppError> {
        let normal = Normal::new(INIT_MEAN, INIT_STD)
            .map_err(|e| AppError::numeric(format!("Weight init distribution error: {e}")))?;

        let dims = [(n_features, hidden), (hidden, 1)];
        let layers = dims
            .iter()
            .map(|&(inputs, outputs)| {
                DenseLayer::new(
                    DMatrix::from_fn(inputs, outputs, |_, _| normal.sample(rng)),
                    DVector::zeros(outputs),
                )
            })
            .collect();

        Ok(Self { layers })
    }

    /// Build a network from explicit parameters.
    ///
    /// # Panics
    /// Panics if consecutive layers do not chain or the last layer does not
    /// have exactly one output.
    pub fn from_layers(layers: Vec<DenseLayer>) -> Self {
        assert!(!layers.is_empty(), "network needs at least one layer");
        for pair in layers.windows(2) {
            assert_eq!(pair[0].n_outputs(), pair[1].n_inputs(), "layer shapes do not chain");
        }
        for layer in &layers {
            assert_eq!(layer.biases.len(), layer.n_outputs(), "bias length must match outputs");
        }
        assert_eq!(layers[layers.len() - 1].n_outputs(), 1, "output layer must be a single unit");
        Self { layers }
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    /// Forward pass for one example, keeping every intermediate value.
    pub fn forward_trace(&self, x_i: &DVector<f64>) -> ForwardTrace {
        let n_layers = self.layers.len();
        let mut inputs = Vec::with_capacity(n_layers);
        let mut pre_activations = Vec::with_capacity(n_layers);

        let mut h = x_i.clone();
        for (k, layer) in self.layers.iter().enumerate() {
            let z = layer.weights.tr_mul(&h) + &layer.biases;
            let next = if k + 1 < n_layers { z.map(relu) } else { z.clone() };
            inputs.push(h);
            pre_activations.push(z);
            h = next;
        }

        ForwardTrace {
            inputs,
            pre_activations,
            output: h[0],
        }
    }

    /// Backpropagate the squared error of one example through a trace.
    ///
    /// Gradients are returned in layer order and are computed entirely from
    /// the current parameters.
    pub fn backward(&self, trace: &ForwardTrace, y_i: f64) -> Vec<LayerGradient> {
        let n_layers = self.layers.len();
        let mut grads = Vec::with_capacity(n_layers);

        // dL/dz at the output unit.
        let mut grad_z = DVector::from_element(1, 2.0 * (trace.output - y_i));

        for k in (0..n_layers).rev() {
            let h = &trace.inputs[k];
            grads.push(LayerGradient {
                weights: h * grad_z.transpose(),
                biases: grad_z.clone(),
            });

            if k > 0 {
                let grad_h = &self.layers[k].weights * &grad_z;
                grad_z = grad_h.zip_map(&trace.pre_activations[k - 1], |g, z| g * relu_grad(z));
            }
        }

        grads.reverse();
        grads
    }

    /// Loss gradients for one example with respect to every weight and bias.
    pub fn gradients(&self, x_i: &DVector<f64>, y_i: f64) -> Vec<LayerGradient> {
        let trace = self.forward_trace(x_i);
        self.backward(&trace, y_i)
    }

    /// `param ← param − learning_rate · grad` for every layer.
    pub fn apply_gradients(&mut self, grads: &[LayerGradient], learning_rate: f64) {
        for (layer, grad) in self.layers.iter_mut().zip(grads) {
            layer.weights -= &grad.weights * learning_rate;
            layer.biases.axpy(-learning_rate, &grad.biases, 1.0);
        }
    }
}

impl Regressor for NeuralRegression {
    fn predict(&self, x: &DMatrix<f64>) -> DVector<f64> {
        let n_layers = self.layers.len();
        let mut h = x.clone();
        for (k, layer) in self.layers.iter().enumerate() {
            let mut z = &h * &layer.weights;
            for (mut col, &b) in z.column_iter_mut().zip(layer.biases.iter()) {
                col.add_scalar_mut(b);
            }
            h = if k + 1 < n_layers { z.map(relu) } else { z };
        }
        h.column(0).into_owned()
    }

    fn update_weight(&mut self, x_i: &DVector<f64>, y_i: f64, opts: &UpdateOptions) {
        let grads = self.gradients(x_i, y_i);
        self.apply_gradients(&grads, opts.learning_rate);
    }
}

/// `max(z, 0)`; NaN passes through.
fn relu(z: f64) -> f64 {
    if z < 0.0 { 0.0 } else { z }
}

/// ReLU derivative; the kink at exactly zero takes the "off" branch.
fn relu_grad(z: f64) -> f64 {
    if z > 0.0 { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn small_network() -> NeuralRegression {
        // 3 inputs, 4 hidden units; hidden unit 2 is inactive for `sample()`.
        NeuralRegression::from_layers(vec![
            DenseLayer::new(
                DMatrix::from_row_slice(
                    3,
                    4,
                    &[
                        0.2, -0.4, -0.9, 0.7, //
                        0.5, 0.3, -0.6, -0.2, //
                        -0.1, 0.8, -0.3, 0.4,
                    ],
                ),
                DVector::from_row_slice(&[0.05, -0.1, -0.2, 0.15]),
            ),
            DenseLayer::new(
                DMatrix::from_row_slice(4, 1, &[0.6, 0.7, 0.9, 1.1]),
                DVector::from_row_slice(&[0.25]),
            ),
        ])
    }

    fn sample() -> (DVector<f64>, f64) {
        (DVector::from_row_slice(&[1.0, 2.0, 0.5]), 3.0)
    }

    fn loss(model: &NeuralRegression, x_i: &DVector<f64>, y_i: f64) -> f64 {
        (model.forward_trace(x_i).output - y_i).powi(2)
    }

    #[test]
    fn fixed_weights_match_hand_computation() {
        let mut model = NeuralRegression::from_layers(vec![
            DenseLayer::new(
                DMatrix::from_row_slice(2, 1, &[0.5, 0.25]),
                DVector::from_row_slice(&[0.0]),
            ),
            DenseLayer::new(DMatrix::from_row_slice(1, 1, &[2.0]), DVector::from_row_slice(&[0.5])),
        ]);
        let x_i = DVector::from_row_slice(&[1.0, 2.0]);
        let y_i = 5.0;

        // z0 = 1*0.5 + 2*0.25 = 1, h0 = 1, y_hat = 2*1 + 0.5 = 2.5
        let trace = model.forward_trace(&x_i);
        assert_eq!(trace.pre_activations[0][0], 1.0);
        assert_eq!(trace.inputs[1][0], 1.0);
        assert_eq!(trace.output, 2.5);

        // dL/dz1 = 2 * (2.5 - 5) = -5
        // dW1 = h0 * -5 = -5, db1 = -5
        // dL/dh0 = W1 * -5 = -10, relu'(1) = 1 -> dL/dz0 = -10
        // dW0 = x * -10 = [-10, -20], db0 = -10
        let grads = model.backward(&trace, y_i);
        assert_eq!(grads[1].weights[(0, 0)], -5.0);
        assert_eq!(grads[1].biases[0], -5.0);
        assert_eq!(grads[0].weights[(0, 0)], -10.0);
        assert_eq!(grads[0].weights[(1, 0)], -20.0);
        assert_eq!(grads[0].biases[0], -10.0);

        model.update_weight(&x_i, y_i, &UpdateOptions { learning_rate: 0.01 });
        let layers = model.layers();
        assert!((layers[0].weights[(0, 0)] - 0.6).abs() < 1e-12);
        assert!((layers[0].weights[(1, 0)] - 0.45).abs() < 1e-12);
        assert!((layers[0].biases[0] - 0.1).abs() < 1e-12);
        assert!((layers[1].weights[(0, 0)] - 2.05).abs() < 1e-12);
        assert!((layers[1].biases[0] - 0.55).abs() < 1e-12);
    }

    #[test]
    fn backprop_matches_central_differences() {
        let model = small_network();
        let (x_i, y_i) = sample();
        let grads = model.gradients(&x_i, y_i);
        let eps = 1e-6;

        for (k, layer) in model.layers().iter().enumerate() {
            for r in 0..layer.weights.nrows() {
                for c in 0..layer.weights.ncols() {
                    let mut plus = model.clone();
                    let mut minus = model.clone();
                    plus.layers[k].weights[(r, c)] += eps;
                    minus.layers[k].weights[(r, c)] -= eps;
                    let numeric = (loss(&plus, &x_i, y_i) - loss(&minus, &x_i, y_i)) / (2.0 * eps);
                    let analytic = grads[k].weights[(r, c)];
                    assert!(
                        (numeric - analytic).abs() < 1e-6,
                        "layer {k} weight ({r},{c}): analytic {analytic}, numeric {numeric}"
                    );
                }
            }
            for j in 0..layer.biases.len() {
                let mut plus = model.clone();
                let mut minus = model.clone();
                plus.layers[k].biases[j] += eps;
                minus.layers[k].biases[j] -= eps;
                let numeric = (loss(&plus, &x_i, y_i) - loss(&minus, &x_i, y_i)) / (2.0 * eps);
                let analytic = grads[k].biases[j];
                assert!(
                    (numeric - analytic).abs() < 1e-6,
                    "layer {k} bias {j}: analytic {analytic}, numeric {numeric}"
                );
            }
        }
    }

    #[test]
    fn inactive_hidden_unit_gets_no_gradient() {
        let model = small_network();
        let (x_i, y_i) = sample();
        let trace = model.forward_trace(&x_i);
        assert!(trace.pre_activations[0][2] < 0.0);

        let grads = model.backward(&trace, y_i);
        assert_eq!(grads[0].biases[2], 0.0);
        for r in 0..3 {
            assert_eq!(grads[0].weights[(r, 2)], 0.0);
        }
        // The output layer sees a zero activation for that unit as well.
        assert_eq!(grads[1].weights[(2, 0)], 0.0);
    }

    #[test]
    fn relu_gradient_is_zero_at_the_kink() {
        assert_eq!(relu_grad(0.0), 0.0);
        assert_eq!(relu_grad(1e-300), 1.0);
        assert_eq!(relu(-2.0), 0.0);
        assert!(relu(f64::NAN).is_nan());
    }

    #[test]
    fn batch_predict_matches_single_example_trace() {
        let model = small_network();
        let x = DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 0.5, -1.0, 0.0, 2.0, 0.3, -0.7, 0.1]);
        let batch = model.predict(&x);
        assert_eq!(batch.len(), 3);
        for (i, row) in x.row_iter().enumerate() {
            let single = model.forward_trace(&row.transpose()).output;
            assert!((batch[i] - single).abs() < 1e-12, "row {i}: {} vs {single}", batch[i]);
        }
    }

    #[test]
    fn update_uses_pre_update_parameters() {
        let model = small_network();
        let (x_i, y_i) = sample();
        let grads = model.gradients(&x_i, y_i);

        let mut updated = model.clone();
        updated.update_weight(&x_i, y_i, &UpdateOptions { learning_rate: 0.1 });

        for (k, layer) in model.layers().iter().enumerate() {
            let expected_w = &layer.weights - &grads[k].weights * 0.1;
            let expected_b = &layer.biases - &grads[k].biases * 0.1;
            assert!((&updated.layers()[k].weights - expected_w).norm() < 1e-12);
            assert!((&updated.layers()[k].biases - expected_b).norm() < 1e-12);
        }
    }

    #[test]
    fn repeated_updates_shrink_single_example_error() {
        let mut model = small_network();
        let (x_i, y_i) = sample();
        let opts = UpdateOptions { learning_rate: 0.01 };

        let mut prev = loss(&model, &x_i, y_i);
        for step in 0..100 {
            model.update_weight(&x_i, y_i, &opts);
            let err = loss(&model, &x_i, y_i);
            assert!(err <= prev, "step {step}: error rose from {prev} to {err}");
            prev = err;
        }
        assert!(prev < 1e-4, "final error {prev}");
    }

    #[test]
    fn new_has_expected_shapes_and_zero_biases() {
        let mut rng = StdRng::seed_from_u64(42);
        let model = NeuralRegression::new(5, 16, &mut rng).unwrap();
        let layers = model.layers();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].weights.shape(), (5, 16));
        assert_eq!(layers[1].weights.shape(), (16, 1));
        assert!(layers.iter().all(|l| l.biases.iter().all(|&b| b == 0.0)));

        let n = (5 * 16 + 16) as f64;
        let mean = layers.iter().flat_map(|l| l.weights.iter()).sum::<f64>() / n;
        assert!((mean - INIT_MEAN).abs() < 0.05, "weight mean {mean}");
    }

    #[test]
    fn same_seed_same_weights() {
        let a = NeuralRegression::new(3, 4, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = NeuralRegression::new(3, 4, &mut StdRng::seed_from_u64(1)).unwrap();
        let c = NeuralRegression::new(3, 4, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

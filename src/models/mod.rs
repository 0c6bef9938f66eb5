//! Regression models.
//!
//! Both models implement the `Regressor` capability: they differ only in how
//! they predict and how a single example updates their parameters, while RMSE
//! evaluation and the sequential epoch sweep are shared.

pub mod linear;
pub mod neural;
pub mod regressor;

pub use linear::LinearRegression;
pub use neural::{DenseLayer, ForwardTrace, LayerGradient, NeuralRegression};
pub use regressor::{Regressor, UpdateOptions};

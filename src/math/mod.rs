//! Mathematical utilities: the closed-form least-squares reference solution.

pub mod ols;

pub use ols::*;

//! Closed-form linear regression.
//!
//! The reference solution for the linear model is
//!
//! ```text
//! w = pinv(XᵀX) · Xᵀ · y
//! ```
//!
//! which equals `pinv(X) · y`. The second form is what gets computed:
//! - The Gram matrix `XᵀX` is singular whenever features are collinear or there
//!   are fewer rows than columns, so a direct inverse is not an option.
//! - Forming `XᵀX` squares the condition number of `X`, so any cutoff applied
//!   to its singular values drops real directions of a full-rank but
//!   ill-conditioned `X`. The SVD is taken of `X` itself.
//! - Singular values below `RCOND · σ_max` are treated as zero, which yields
//!   the least-norm solution for rank-deficient systems.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;

/// Relative singular-value cutoff for the pseudo-inverse of `X`.
///
/// Rounding noise on an exactly-zero singular value stays within a few
/// `f64::EPSILON · σ_max`.
const RCOND: f64 = 1e-12;

/// Solve `min ‖Xw − y‖²`, returning the least-norm minimiser.
///
/// `x` is `n_points × n_features` (bias column included by the caller).
pub fn solve_analytically(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, AppError> {
    if x.nrows() == 0 {
        return Err(AppError::no_data("Cannot solve least squares with zero rows."));
    }

    let w = pseudo_inverse(x)? * y;

    if w.iter().any(|v| !v.is_finite()) {
        return Err(AppError::numeric("Analytic solution contains non-finite weights."));
    }
    Ok(w)
}

/// Moore–Penrose pseudo-inverse with a relative singular-value cutoff.
pub fn pseudo_inverse(m: &DMatrix<f64>) -> Result<DMatrix<f64>, AppError> {
    let svd = m.clone().svd(true, true);
    let tol = RCOND * svd.singular_values.max();

    svd.pseudo_inverse(tol)
        .map_err(|e| AppError::numeric(format!("Pseudo-inverse failed: {e}")))
}

/// Euclidean distance between two parameter vectors.
pub fn distance(a: &DVector<f64>, b: &DVector<f64>) -> f64 {
    (a - b).norm()
}

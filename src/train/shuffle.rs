//! Lockstep row shuffling.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::Dataset;

/// A fresh uniformly random permutation of `0..n`.
pub fn permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    order
}

/// Reorder `data` in place by a fresh permutation, moving `x` rows and `y`
/// entries together. Returns the permutation that was applied.
pub fn shuffle_rows<R: Rng + ?Sized>(data: &mut Dataset, rng: &mut R) -> Vec<usize> {
    let order = permutation(data.n_points(), rng);
    *data = data.select_rows(&order);
    order
}

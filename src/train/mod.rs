//! Epoch-level training: per-epoch shuffling and the train/evaluate loop.

pub mod driver;
pub mod shuffle;

pub use driver::*;
pub use shuffle::*;

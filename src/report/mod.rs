//! Reporting utilities: formatted terminal output for training runs.

pub mod format;

pub use format::*;

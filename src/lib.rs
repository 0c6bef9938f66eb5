//! `sgd-regression` library crate.
//!
//! The binary (`sgdreg`) is a thin wrapper around this library so that:
//!
//! - the models and the training loop are testable without spawning processes
//! - the backpropagation code can be reused outside the CLI

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod train;

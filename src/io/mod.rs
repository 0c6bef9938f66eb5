//! Output files.
//!
//! - training history JSON (`export`)

pub mod export;

pub use export::*;

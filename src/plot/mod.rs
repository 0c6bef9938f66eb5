//! Loss and distance charts.
//!
//! - `ascii`: fixed-size character plots printed after training
//! - `svg`: Plotters charts written to disk on request

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;

/// One named line of `(epoch, value)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    /// Character used for this series in ASCII plots.
    pub glyph: char,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn from_epochs(label: impl Into<String>, glyph: char, epochs: &[usize], values: &[f64]) -> Self {
        Self {
            label: label.into(),
            glyph,
            points: epochs.iter().zip(values).map(|(&e, &v)| (e as f64, v)).collect(),
        }
    }
}

/// Loss series (train and test) for a finished run.
pub fn loss_series(history: &crate::domain::TrainingHistory) -> Vec<Series> {
    let epochs = history.epoch_indices();
    vec![
        Series::from_epochs("train", 't', &epochs, &history.train_losses()),
        Series::from_epochs("test", 'v', &epochs, &history.test_losses()),
    ]
}

/// Distance-from-analytic series, when the run recorded one.
pub fn distance_series(history: &crate::domain::TrainingHistory) -> Option<Series> {
    let distances = history.distances()?;
    Some(Series::from_epochs("dist", 'd', &history.epoch_indices(), &distances))
}

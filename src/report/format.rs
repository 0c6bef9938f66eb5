//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the model/training code stays free of presentation concerns
//! - output changes are localized (and easy to snapshot-test)

use nalgebra::DVector;

use crate::domain::{DataSource, DataSplit, EpochMetrics, ModelChoice, TrainConfig, TrainingHistory};
use crate::models::{LinearRegression, Regressor};

/// Quality of the closed-form solution, for comparison with SGD.
#[derive(Debug, Clone)]
pub struct AnalyticSummary {
    pub weights: DVector<f64>,
    pub train_rmse: f64,
    pub test_rmse: f64,
}

impl AnalyticSummary {
    pub fn new(weights: DVector<f64>, split: &DataSplit) -> Self {
        let model = LinearRegression::from_weights(weights);
        let train_rmse = model.evaluate(&split.train.x, &split.train.y);
        let test_rmse = model.evaluate(&split.test.x, &split.test.y);
        Self {
            weights: model.weights().clone(),
            train_rmse,
            test_rmse,
        }
    }
}

/// Progress line printed before an epoch's updates.
pub fn format_epoch_start(epoch: usize) -> String {
    format!("Epoch {epoch}... ")
}

/// Loss line printed after an epoch.
pub fn format_epoch_metrics(metrics: &EpochMetrics) -> String {
    let mut out = format!(
        "Loss (train): {:.3} | Loss (test): {:.3}",
        metrics.train_rmse, metrics.test_rmse
    );
    if let Some(d) = metrics.distance {
        out.push_str(&format!(" | Dist: {d:.3}"));
    }
    out
}

/// Run header: model, data shape, and optimisation settings.
pub fn format_run_header(config: &TrainConfig, split: &DataSplit, analytic: Option<&AnalyticSummary>) -> String {
    let mut out = String::new();

    out.push_str("=== sgdreg - SGD regression ===\n");
    out.push_str(&format!("Model: {}", config.model.display_name()));
    if config.model == ModelChoice::Nn {
        out.push_str(&format!(" (hidden={})", config.hidden_size));
    }
    out.push('\n');

    match &config.data {
        DataSource::Csv(path) => out.push_str(&format!("Data: {}\n", path.display())),
        DataSource::Synthetic(spec) => out.push_str(&format!(
            "Data: synthetic (n={}, features={}, noise={})\n",
            spec.n_points, spec.n_features, spec.noise
        )),
    }
    out.push_str(&format!(
        "Split: train={} test={} | features={}{}\n",
        split.train.n_points(),
        split.test.n_points(),
        split.train.n_features(),
        if config.model.wants_bias_column() { " (incl. bias)" } else { "" },
    ));
    out.push_str(&format!(
        "SGD: epochs={} lr={} seed={}\n",
        config.epochs, config.learning_rate, config.seed
    ));

    if let Some(a) = analytic {
        out.push_str(&format!(
            "Analytic solution: Loss (train): {:.3} | Loss (test): {:.3}\n",
            a.train_rmse, a.test_rmse
        ));
        out.push_str(&format!("  w* = {}\n", format_vector(&a.weights)));
    }

    out
}

/// Closing summary after the last epoch.
pub fn format_final_summary(history: &TrainingHistory) -> String {
    let Some(last) = history.last() else {
        return "No epochs were run.\n".to_string();
    };

    let best = history
        .epochs
        .iter()
        .min_by(|a, b| a.test_rmse.total_cmp(&b.test_rmse))
        .unwrap_or(last);

    let mut out = format!(
        "Final after {} epochs: {}\n",
        history.len(),
        format_epoch_metrics(last)
    );
    out.push_str(&format!(
        "Best test loss: {:.3} (epoch {})\n",
        best.test_rmse, best.epoch
    ));
    out
}

fn format_vector(v: &DVector<f64>) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.4}")).collect();
    format!("[{}]", parts.join(", "))
}

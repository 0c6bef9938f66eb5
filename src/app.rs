//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - validates them into a `TrainConfig`
//! - prepares data, the analytic reference, and the model
//! - trains while printing per-epoch losses
//! - prints plots and writes optional SVG/JSON outputs

use std::fs::create_dir_all;

use clap::Parser;
use tracing::info;

use crate::cli::Cli;
use crate::domain::{DataSource, ModelChoice, SyntheticSpec, TrainConfig, TrainingHistory};
use crate::error::AppError;
use crate::plot::{distance_series, loss_series, render_series_plot, write_svg_chart};
use crate::report::{format_epoch_metrics, format_epoch_start, format_final_summary, format_run_header};
use crate::train::EpochEvent;

pub mod pipeline;

/// Entry point for the `sgdreg` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env file is fine; clap `env` attributes just see the real environment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    crate::logging::init(cli.verbose)?;

    let config = train_config_from_args(&cli)?;
    info!(model = config.model.display_name(), seed = config.seed, "Starting run");

    let mut prepared = pipeline::prepare(&config)?;
    println!(
        "{}",
        format_run_header(&config, &prepared.split, prepared.analytic.as_ref())
    );

    let history = pipeline::train_prepared(&config, &mut prepared, |event| match event {
        EpochEvent::Started { epoch } => println!("{}", format_epoch_start(epoch)),
        EpochEvent::Finished(metrics) => println!("{}", format_epoch_metrics(metrics)),
    });

    print!("\n{}", format_final_summary(&history));
    write_outputs(&config, &history)
}

fn write_outputs(config: &TrainConfig, history: &TrainingHistory) -> Result<(), AppError> {
    let losses = loss_series(history);
    let distances = distance_series(history);

    if config.plot && !history.is_empty() {
        println!();
        println!("{}", render_series_plot("Loss", &losses, config.plot_width, config.plot_height));
        if let Some(dist) = &distances {
            println!(
                "{}",
                render_series_plot(
                    "Dist",
                    std::slice::from_ref(dist),
                    config.plot_width,
                    config.plot_height
                )
            );
        }
    }

    if let Some(dir) = &config.svg_dir {
        create_dir_all(dir)
            .map_err(|e| AppError::input(format!("Failed to create chart dir '{}': {e}", dir.display())))?;
        write_svg_chart(&dir.join("loss.svg"), "Loss", "RMSE", &losses)?;
        if let Some(dist) = &distances {
            write_svg_chart(
                &dir.join("distance.svg"),
                "Distance from analytic solution",
                "Dist",
                std::slice::from_ref(dist),
            )?;
        }
        info!(dir = %dir.display(), "Wrote SVG charts");
    }

    if let Some(path) = &config.export {
        crate::io::write_history_json(path, config, history)?;
        info!(path = %path.display(), "Wrote history JSON");
    }

    Ok(())
}

/// Validate CLI arguments into a run configuration.
pub fn train_config_from_args(cli: &Cli) -> Result<TrainConfig, AppError> {
    if cli.epochs == 0 {
        return Err(AppError::input("--epochs must be at least 1."));
    }
    if cli.model == ModelChoice::Nn && cli.hidden_size == 0 {
        return Err(AppError::input("--hidden-size must be at least 1."));
    }
    if !(cli.learning_rate.is_finite() && cli.learning_rate > 0.0) {
        return Err(AppError::input(format!(
            "--learning-rate must be a positive number, got {}.",
            cli.learning_rate
        )));
    }
    if !(cli.test_fraction.is_finite() && cli.test_fraction > 0.0 && cli.test_fraction < 1.0) {
        return Err(AppError::input(format!(
            "--test-fraction must be in (0, 1), got {}.",
            cli.test_fraction
        )));
    }

    let data = match &cli.data {
        Some(path) => DataSource::Csv(path.clone()),
        None => DataSource::Synthetic(SyntheticSpec {
            n_points: cli.samples,
            n_features: cli.features,
            noise: cli.noise,
        }),
    };

    Ok(TrainConfig {
        model: cli.model,
        epochs: cli.epochs,
        hidden_size: cli.hidden_size,
        learning_rate: cli.learning_rate,
        seed: cli.seed,
        data,
        test_fraction: cli.test_fraction,
        plot: !cli.no_plot,
        plot_width: cli.width,
        plot_height: cli.height,
        svg_dir: cli.svg_dir.clone(),
        export: cli.export.clone(),
    })
}

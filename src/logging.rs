//! Tracing initialisation.
//!
//! Diagnostics go to stderr through `tracing-subscriber`; stdout is reserved for
//! the per-epoch report and plots.

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV: &str = "SGD_REGRESSION_LOG";

const DEFAULT_DIRECTIVES: &str = "sgd_regression=warn";

/// Initialises the global tracing subscriber.
///
/// Verbosity bumps the crate's level: `0` keeps the env/default filter, `1` is
/// `info`, `2` is `debug`, anything higher is `trace`.
pub fn init(verbosity: u8) -> Result<(), AppError> {
    let filter = match verbosity {
        0 => EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVES)),
        v => EnvFilter::try_new(directives_for(v)),
    }
    .map_err(|e| AppError::input(format!("Invalid log filter: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .map_err(|e| AppError::input(format!("Failed to initialise logging: {e}")))
}

fn directives_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => DEFAULT_DIRECTIVES,
        1 => "sgd_regression=info",
        2 => "sgd_regression=debug",
        _ => "sgd_regression=trace",
    }
}

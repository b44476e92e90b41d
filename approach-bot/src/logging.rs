use crate::config::BotConfigError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging. `RUST_LOG` wins over the configured level;
/// `verbose` forces debug output.
pub fn init_logging(level: &str, verbose: bool) -> Result<(), BotConfigError> {
    let env_filter = build_filter(level, verbose)?;

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| BotConfigError::Logging(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

fn build_filter(level: &str, verbose: bool) -> Result<EnvFilter, BotConfigError> {
    let default_level = if verbose { "debug" } else { level };

    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| BotConfigError::Logging(format!("Failed to create log filter: {}", e)))
}

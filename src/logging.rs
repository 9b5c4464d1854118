use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;
use crate::utils::error::{AppError, Result};

/// Filter from `RUST_LOG`, falling back to the configured level for this crate.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    build_filter(config, std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

fn build_filter(config: &LoggingConfig, rust_log: Option<&str>) -> Result<EnvFilter> {
    if let Some(directives) = rust_log {
        return Ok(EnvFilter::new(directives));
    }

    let filter = format!("bullion_watcher={}", config.level.to_lowercase());
    let directive: Directive = filter
        .parse()
        .map_err(|e| AppError::Validation(format!("Invalid log directive '{}': {}", filter, e)))?;
    Ok(EnvFilter::new("warn").add_directive(directive))
}

/// Install the process-wide subscriber: stderr always, plus the log file when configured.
///
/// The returned guard flushes the file writer when dropped; keep it alive until exit.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let console = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match &config.file {
        Some(file) => {
            std::fs::create_dir_all(&config.directory)?;
            let appender = tracing_appender::rolling::never(Path::new(&config.directory), file);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter(config)?)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::Validation(format!("Failed to initialize logging: {}", e)))?;

    Ok(guard)
}

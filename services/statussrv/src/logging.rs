//! Logging initialization
//!
//! Console layer always, plus an optional non-blocking file layer when
//! `LOG_FILE_PATH` is set. `RUST_LOG` overrides the configured level.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

/// Initialize the tracing subscriber.
///
/// Returns the appender guard when a file sink is configured; the caller
/// must keep it alive for the lifetime of the process or buffered log
/// lines are dropped on exit.
pub fn init(config: &LogConfig) -> std::io::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_filter()));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());

    match &config.file_path {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);

            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .init();

            Ok(Some(guard))
        },
        None => {
            registry.init();
            Ok(None)
        },
    }
}

use configuration::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over the configured level. Diagnostics go to stderr so that
/// stdout stays clean for `--format json`. When a log directory is configured
/// a daily rolling file is written as well; keep the returned guard alive
/// until exit or buffered lines are lost.
pub fn init(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "newstrade.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()?;
            Ok(None)
        }
    }
}

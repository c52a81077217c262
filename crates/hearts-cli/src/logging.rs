use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Keeps the background log writer alive. Drop it last.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

/// Installs the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_logging(logging: &LoggingConfig) -> Result<LoggingGuard> {
    let (writer, guard) = match logging.file.as_deref() {
        Some(path) => {
            let file = open_log_file(path)?;
            non_blocking::NonBlockingBuilder::default()
                .lossy(false)
                .finish(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let level = logging.level().unwrap_or(Level::WARN);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::NONE)
        .with_target(true)
        .with_writer(writer);

    // Ignore error if a global subscriber is already set (e.g., when running in tests)
    if logging.json {
        let subscriber = builder.json().with_current_span(false).finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    } else {
        let subscriber = builder.with_ansi(logging.file.is_none()).finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    Ok(LoggingGuard { _guard: guard })
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory at {}", parent.display()))?;
    }
    File::create(path).with_context(|| format!("creating log file at {}", path.display()))
}

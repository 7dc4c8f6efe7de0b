use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;
use trattoria_core::config::{AppConfig, LogFormat};

static LOGGING_INIT: OnceLock<()> = OnceLock::new();

/// Installs the global subscriber once. Logs go to stderr; stdout carries the
/// command outcome. `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &AppConfig) {
    if LOGGING_INIT.get().is_some() {
        return;
    }

    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(env_filter(&config.logging.level))
        .with_writer(std::io::stderr);

    let installed = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if installed.is_ok() {
        let _ = LOGGING_INIT.set(());
    }
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.trim()))
}

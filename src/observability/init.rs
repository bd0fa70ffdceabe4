//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
pub const LOG_FILE_NAME: &str = "binsmart.log";

/// Initializes the global subscriber, writing to a rotating log file.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `config.trace_level`, otherwise `info`. Stdout is never used.
///
/// Returns the log file path, or `None` when the data directory cannot be
/// created. Calling it again after a subscriber is installed has no effect.
///
/// # Example
///
/// ```no_run
/// use binsmart::observability::init_tracing;
/// use binsmart::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return None;
    }

    let log_file = data_dir.join(LOG_FILE_NAME);
    let directive = resolve_directive(
        std::env::var("RUST_LOG").ok(),
        config.trace_level.as_deref(),
    );
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_thread_names(true)
        .with_target(true)
        .with_writer(FileWriter::new(log_file.clone()));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            filter = %directive,
            "tracing initialized"
        );
    }

    Some(log_file)
}

fn resolve_directive(env: Option<String>, configured: Option<&str>) -> String {
    env.filter(|value| !value.trim().is_empty())
        .or_else(|| configured.map(ToString::to_string))
        .unwrap_or_else(|| "info".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_wins_over_config() {
        assert_eq!(
            resolve_directive(Some("binsmart=trace".into()), Some("debug")),
            "binsmart=trace"
        );
    }

    #[test]
    fn config_then_default() {
        assert_eq!(resolve_directive(None, Some("debug")), "debug");
        assert_eq!(resolve_directive(Some("  ".into()), None), "info");
        assert_eq!(resolve_directive(None, None), "info");
    }
}

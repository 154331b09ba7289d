//! Logging setup for hosts embedding the dispatcher
//!
//! The dispatcher only emits `tracing` events. Hosts that have no subscriber
//! of their own can install one here.

use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Logging mode for different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// No subscriber is installed
    Silent,
    /// Compact stderr output
    Development,
    /// Verbose output with thread ids and source locations
    Debug,
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
}

/// Initialize logging with the specified mode
///
/// A host that already installed a global subscriber keeps it; this is then
/// a no-op.
///
/// # Environment Variables
///
/// - `PDA_SCANNER_LOG_LEVEL`: Override the filter (e.g. "scan_dispatch=debug")
/// - `RUST_LOG`: Used when `PDA_SCANNER_LOG_LEVEL` is unset
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let (default_level, layer): (&str, Box<dyn Layer<Registry> + Send + Sync>) = match mode {
        LoggingMode::Silent => return Ok(()),
        LoggingMode::Development => ("info", fmt::layer().with_target(false).compact().boxed()),
        LoggingMode::Debug => (
            "debug",
            fmt::layer()
                .pretty()
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        ),
    };

    if is_initialized() {
        tracing::debug!("Global subscriber already installed, keeping it");
        return Ok(());
    }

    Registry::default()
        .with(layer)
        .with(env_filter(default_level))
        .try_init()
        .map_err(|e| LoggingError::TracingInit(e.to_string()))
}

/// Initialize logging from `PDA_SCANNER_LOG_MODE`
///
/// - "development" -> LoggingMode::Development
/// - "debug" -> LoggingMode::Debug
///
/// Anything else, including an unset variable, is silent.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    init_logging(mode_from_env_value(
        std::env::var("PDA_SCANNER_LOG_MODE").ok().as_deref(),
    ))
}

fn mode_from_env_value(value: Option<&str>) -> LoggingMode {
    match value {
        Some("development") => LoggingMode::Development,
        Some("debug") => LoggingMode::Debug,
        _ => LoggingMode::Silent,
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    if let Ok(level) = std::env::var("PDA_SCANNER_LOG_LEVEL") {
        EnvFilter::new(level)
    } else if let Ok(rust_log) = std::env::var("RUST_LOG") {
        EnvFilter::new(rust_log)
    } else {
        EnvFilter::new(default_level)
    }
}

/// Check if a global subscriber has been installed
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}

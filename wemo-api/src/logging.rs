//! Logging setup for applications using the WeMo API
//!
//! The library itself only emits `tracing` events; nothing is printed unless
//! the application installs a subscriber. These helpers install one.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// How events are rendered once a subscriber is installed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// No subscriber, events are dropped
    Silent,
    /// Compact stderr output at `info`
    Development,
    /// Verbose output with source locations at `debug`
    Debug,
    /// One JSON object per event at `info`, for log shippers
    Json,
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install a global subscriber for `mode`
///
/// `WEMO_LOG_LEVEL` overrides the mode's default filter (e.g. `warn` or
/// `wemo_api=debug`), then `RUST_LOG`. Fails if a subscriber is already set.
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    let (layer, default_level): (BoxedLayer, &str) = match mode {
        LoggingMode::Silent => return Ok(()),
        LoggingMode::Development => (
            fmt::layer().with_target(false).compact().boxed(),
            "info",
        ),
        LoggingMode::Debug => (
            fmt::layer()
                .pretty()
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
            "debug",
        ),
        LoggingMode::Json => (fmt::layer().json().with_current_span(false).boxed(), "info"),
    };

    Registry::default()
        .with(layer)
        .with(env_filter(default_level))
        .try_init()
        .map_err(|e| LoggingError::TracingInit(e.to_string()))
}

/// Initialize logging from the `WEMO_LOG_MODE` environment variable
///
/// `development`, `debug` and `json` select the matching mode; anything else
/// is silent.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    init_logging(mode_from_env(std::env::var("WEMO_LOG_MODE").ok().as_deref()))
}

fn mode_from_env(value: Option<&str>) -> LoggingMode {
    match value {
        Some("development") => LoggingMode::Development,
        Some("debug") => LoggingMode::Debug,
        Some("json") => LoggingMode::Json,
        _ => LoggingMode::Silent,
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    let directives = std::env::var("WEMO_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| default_level.to_string());
    EnvFilter::new(directives)
}

/// Check if a global subscriber has been installed
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}

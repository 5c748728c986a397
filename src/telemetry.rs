//! Logging configuration.
//!
//! The walkers in this crate emit `tracing` events at `debug` and `trace`
//! level only. Applications that do not already install a subscriber can use
//! the helpers here.
//!
//! ```rust,no_run
//! use kafkaesque_fetch::telemetry::{LogFormat, init_logging};
//!
//! init_logging(LogFormat::Pretty).expect("Failed to init logging");
//! ```
//!
//! # Environment Variables
//!
//! - `LOG_FORMAT`: Set to `json` or `pretty` (default: `pretty`)
//! - `RUST_LOG`: Control log levels (default: `info`)

use tracing::Subscriber;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

use crate::error::{Error, Result};

const DEFAULT_FILTER: &str = "info";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty-print format (default).
    #[default]
    Pretty,
    /// JSON format for log aggregators.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        })
    }
}

impl LogFormat {
    /// Read from LOG_FORMAT environment variable.
    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .map(|s| s.parse().unwrap_or_default())
            .unwrap_or_default()
    }
}

/// Logging settings resolved from the environment or set explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub log_format: LogFormat,
    /// Filter directive used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Reads `LOG_FORMAT`. `RUST_LOG` is read by [`init_telemetry`] itself.
    pub fn from_env() -> Self {
        Self {
            log_format: LogFormat::from_env(),
            ..Self::default()
        }
    }
}

/// Initialize logging with the specified format.
///
/// Log levels are controlled via the `RUST_LOG` environment variable.
pub fn init_logging(format: LogFormat) -> Result<()> {
    init_telemetry(TelemetryConfig {
        log_format: format,
        ..TelemetryConfig::default()
    })
}

/// Install a global subscriber built from `config`.
///
/// Fails if a global subscriber is already installed.
pub fn init_telemetry(config: TelemetryConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_filter))
        .map_err(|e| Error::Config(format!("invalid log filter: {e}")))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer(config.log_format, std::io::stdout))
        .try_init()
        .map_err(|e| Error::Config(e.to_string()))
}

fn fmt_layer<S, W>(format: LogFormat, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span> + 'static,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
        LogFormat::Pretty => fmt::layer().with_writer(writer).boxed(),
    }
}

//! Log output for the audit service.
//!
//! The filter directive comes from `RUST_LOG` when it is set and non-empty,
//! otherwise from `APP_LOG_LEVEL`. Classification and layout events are
//! emitted at `debug`, so `listing_audit=debug` shows the funnel counts
//! without the axum and hyper noise.

use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    /// The directive did not parse. `from_rust_log` tells which variable to fix.
    Filter {
        directive: String,
        from_rust_log: bool,
        source: ParseError,
    },
    Install(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Filter {
                directive,
                from_rust_log,
                ..
            } => {
                let origin = if *from_rust_log {
                    "RUST_LOG"
                } else {
                    "APP_LOG_LEVEL"
                };
                write!(f, "{origin} holds an unusable log filter '{directive}'")
            }
            TelemetryError::Install(err) => {
                write!(f, "could not install the log subscriber: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Filter { source, .. } => Some(source),
            TelemetryError::Install(err) => Some(&**err),
        }
    }
}

/// Picks the filter directive. A blank `RUST_LOG` counts as unset.
fn select_directive(config: &TelemetryConfig, rust_log: Option<String>) -> (String, bool) {
    match rust_log {
        Some(value) if !value.trim().is_empty() => (value, true),
        _ => (config.log_level.clone(), false),
    }
}

fn build_filter(directive: String, from_rust_log: bool) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&directive).map_err(|source| TelemetryError::Filter {
        directive,
        from_rust_log,
        source,
    })
}

/// Builds the filter without installing anything.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    let (directive, from_rust_log) =
        select_directive(config, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    build_filter(directive, from_rust_log)
}

/// Installs the global fmt subscriber. Fails if one is already set.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Install)
}

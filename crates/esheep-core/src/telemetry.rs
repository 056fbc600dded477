//! Logging setup built on `tracing-subscriber`.
//!
//! The SDK itself only emits `tracing` events. Binaries call [`init_logging`]
//! once to install a subscriber; library users are free to install their own.

use crate::{EsheepError, EsheepResult};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether to write log events to stdout at all.
    #[serde(default = "default_console_output")]
    pub console_output: bool,

    /// Emit JSON lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,

    /// Filter directives used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_console_output() -> bool {
    true
}

fn default_filter() -> String {
    "info,esheep=debug".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            console_output: default_console_output(),
            json: false,
            filter: default_filter(),
        }
    }
}

impl TelemetryConfig {
    /// Builds the env filter, preferring `RUST_LOG` over the configured directives.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.filter))
    }
}

/// Installs the global `tracing` subscriber.
///
/// Fails if a global subscriber was already installed.
pub fn init_logging(config: &TelemetryConfig) -> EsheepResult<()> {
    if !config.console_output {
        return Ok(());
    }

    let registry = tracing_subscriber::registry().with(config.env_filter());

    let result = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    result.map_err(|e| EsheepError::configuration(format!("Failed to install logger: {}", e)))?;

    tracing::debug!(json = config.json, filter = %config.filter, "Logging initialized");

    Ok(())
}

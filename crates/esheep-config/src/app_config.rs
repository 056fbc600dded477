//! Configuration structures.

use esheep_core::TelemetryConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Connection and diagnostics settings for the client facade.
    #[serde(default)]
    pub client: ClientConfig,

    /// Room the runner creates or joins.
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Client facade configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service host name or address.
    pub host: String,
    /// Service port.
    pub port: u16,
    /// Token embedded in every request.
    pub api_token: String,
    /// Directory the diagnostics log is created in.
    pub logfile_path: PathBuf,
    /// Write one diagnostics line per call.
    pub debug: bool,
    /// How long construction waits for the channel to become ready, in
    /// milliseconds.
    pub connect_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 50051,
            api_token: String::new(),
            logfile_path: PathBuf::from("./"),
            debug: false,
            connect_timeout_ms: 10_000,
        }
    }
}

impl ClientConfig {
    /// Creates a config for the given endpoint and token with default
    /// log directory, diagnostics off and a 10 second readiness timeout.
    pub fn new(host: impl Into<String>, port: u16, api_token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            api_token: api_token.into(),
            ..Default::default()
        }
    }

    /// Sets the diagnostics log directory.
    #[must_use]
    pub fn with_logfile_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.logfile_path = path.into();
        self
    }

    /// Enables or disables per-call diagnostics.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Sets the readiness timeout. Sub-millisecond remainders round up, so
    /// only a zero duration yields a zero timeout, which `connect` rejects.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_nanos().div_ceil(1_000_000);
        self.connect_timeout_ms = u64::try_from(millis).unwrap_or(u64::MAX);
        self
    }

    /// Returns `host:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the plaintext HTTP/2 endpoint URI.
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr())
    }

    /// Returns the readiness timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

/// Room session played by the runner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Room password.
    pub password: String,
    /// Join this room instead of creating one.
    pub room_id: Option<String>,
}

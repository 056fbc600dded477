//! Unified error type for the esheep SDK.

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the esheep SDK.
///
/// A call that completes without a response body is not an error; the facade
/// reports it as `Ok(None)`. Everything the RPC layer raises mid-call is
/// passed through untouched as [`EsheepError::Rpc`].
#[derive(Error, Debug)]
pub enum EsheepError {
    /// The channel did not become ready before the readiness deadline.
    #[error("Error connecting to server: {endpoint} not ready after {timeout:?}")]
    ConnectTimeout { endpoint: String, timeout: Duration },

    /// The endpoint address could not be turned into a URI.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Local I/O failure (diagnostics log, runtime creation).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raw status returned by the RPC layer.
    #[error("RPC failed: {0}")]
    Rpc(#[from] tonic::Status),
}

impl EsheepError {
    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ConnectTimeout { .. } => "CONNECT_TIMEOUT",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Rpc(_) => "RPC_ERROR",
        }
    }

    /// True for errors raised while establishing the connection.
    #[must_use]
    pub const fn is_connection_fault(&self) -> bool {
        matches!(self, Self::ConnectTimeout { .. } | Self::InvalidEndpoint(_))
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns the RPC status when this error came from a remote call.
    #[must_use]
    pub fn status(&self) -> Option<&tonic::Status> {
        match self {
            Self::Rpc(status) => Some(status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let timeout = EsheepError::ConnectTimeout {
            endpoint: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(10),
        };
        assert_eq!(timeout.error_code(), "CONNECT_TIMEOUT");
        assert_eq!(EsheepError::configuration("bad").error_code(), "CONFIGURATION_ERROR");
        assert_eq!(
            EsheepError::from(tonic::Status::unavailable("down")).error_code(),
            "RPC_ERROR"
        );
    }

    #[test]
    fn test_connect_timeout_message() {
        let err = EsheepError::ConnectTimeout {
            endpoint: "http://10.0.0.1:50051".to_string(),
            timeout: Duration::from_secs(10),
        };
        let message = err.to_string();
        assert!(message.starts_with("Error connecting to server"));
        assert!(message.contains("10.0.0.1:50051"));
    }

    #[test]
    fn test_connection_faults() {
        assert!(EsheepError::InvalidEndpoint("::".to_string()).is_connection_fault());
        assert!(!EsheepError::from(tonic::Status::internal("boom")).is_connection_fault());
        assert!(!EsheepError::configuration("x").is_connection_fault());
    }

    #[test]
    fn test_rpc_status_passes_through() {
        let err = EsheepError::from(tonic::Status::permission_denied("bad token"));
        let status = err.status().unwrap();
        assert_eq!(status.code(), tonic::Code::PermissionDenied);
        assert_eq!(status.message(), "bad token");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: EsheepError = io.into();
        assert!(matches!(err, EsheepError::Io(_)));
        assert!(err.status().is_none());
    }
}

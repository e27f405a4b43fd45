use serde::Serialize;
use std::path::PathBuf;

use crate::types::{InstanceId, InstanceState};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Errors surfaced by the bridge facade and recorded by the dispatch thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum BridgeError {
    /// Malformed call arguments, detected before anything is enqueued.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("instance not found: {0}")]
    InstanceNotFound(InstanceId),

    #[error("instance already registered: {0}")]
    DuplicateInstance(InstanceId),

    #[error("{kind} not allowed while {instance} is {state}")]
    InvalidState {
        instance: InstanceId,
        state: InstanceState,
        kind: &'static str,
    },

    #[error("native window creation failed: {0}")]
    NativeCreation(String),

    #[error("native operation failed: {0}")]
    NativeOperation(String),

    #[error("bridge has shut down")]
    BridgeShutdown,
}

#[derive(Debug, thiserror::Error)]
pub enum WebBridgeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("missing field 'name'".into());
        assert_eq!(
            err.to_string(),
            "config validation error: missing field 'name'"
        );
    }

    #[test]
    fn bridge_error_display() {
        let err = BridgeError::InstanceNotFound(InstanceId(7));
        assert_eq!(err.to_string(), "instance not found: instance-7");

        let err = BridgeError::InvalidArgument("url must not be empty".into());
        assert_eq!(err.to_string(), "invalid argument: url must not be empty");

        let err = BridgeError::BridgeShutdown;
        assert_eq!(err.to_string(), "bridge has shut down");
    }

    #[test]
    fn invalid_state_names_kind_and_state() {
        let err = BridgeError::InvalidState {
            instance: InstanceId(3),
            state: InstanceState::Created,
            kind: "Navigate",
        };
        assert_eq!(
            err.to_string(),
            "Navigate not allowed while instance-3 is created"
        );
    }

    #[test]
    fn webbridge_error_from_bridge() {
        let err: WebBridgeError = BridgeError::NativeCreation("no display".into()).into();
        assert!(matches!(err, WebBridgeError::Bridge(_)));
        assert!(err.to_string().contains("no display"));
    }

    #[test]
    fn webbridge_error_from_config() {
        let err: WebBridgeError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, WebBridgeError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn webbridge_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: WebBridgeError = io_err.into();
        assert!(matches!(err, WebBridgeError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }
}

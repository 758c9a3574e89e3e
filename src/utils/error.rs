use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Failed to bind reply endpoint {endpoint}: {source}")]
    BindError {
        endpoint: String,
        #[source]
        source: zeromq::ZmqError,
    },

    #[error("Transport error: {0}")]
    TransportError(#[from] zeromq::ZmqError),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Reply channel failed {failures} times in a row")]
    ChannelExhausted { failures: u32 },
}

/// Envelope problems answered with an `{"error": ...}` reply.
///
/// The display strings are part of the wire contract.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Invalid JSON")]
    InvalidJson,

    #[error("Missing 'address' field")]
    MissingAddress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Startup,
    Transport,
    Upstream,
    Configuration,
    Internal,
}

impl ServiceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ServiceError::BindError { .. } => ErrorCategory::Startup,
            ServiceError::TransportError(_) | ServiceError::ChannelExhausted { .. } => {
                ErrorCategory::Transport
            }
            ServiceError::HttpClientError(_) => ErrorCategory::Upstream,
            ServiceError::ConfigError { .. } | ServiceError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            ServiceError::IoError(_) | ServiceError::SerializationError(_) => {
                ErrorCategory::Internal
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Startup => {
                "Check that the bind endpoint is well formed and not already in use"
            }
            ErrorCategory::Transport => "Restart the service; clients must reconnect",
            ErrorCategory::Upstream => "Check TLS support and network access to the verifier",
            ErrorCategory::Configuration => "Fix the command line arguments and try again",
            ErrorCategory::Internal => "Re-run with --verbose and inspect the logs",
        }
    }

    /// Process exit code for a fatal error.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Startup => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_wire_messages() {
        assert_eq!(ProtocolError::InvalidJson.to_string(), "Invalid JSON");
        assert_eq!(
            ProtocolError::MissingAddress.to_string(),
            "Missing 'address' field"
        );
    }

    #[test]
    fn test_config_errors_are_categorized() {
        let err = ServiceError::InvalidConfigValueError {
            field: "bind".to_string(),
            value: "nowhere".to_string(),
            reason: "unsupported transport".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("bind"));
    }
}

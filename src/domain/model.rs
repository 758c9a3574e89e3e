use crate::utils::error::ProtocolError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single inbound address, already trimmed and known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRequest {
    address: String,
}

impl AddressRequest {
    /// Builds a request from a raw address, trimming surrounding whitespace.
    pub fn new(address: &str) -> std::result::Result<Self, ProtocolError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ProtocolError::MissingAddress);
        }
        Ok(Self {
            address: address.to_string(),
        })
    }

    /// Parses one request envelope: a JSON object with a string `address` field.
    pub fn from_message(raw: &[u8]) -> std::result::Result<Self, ProtocolError> {
        let value: serde_json::Value =
            serde_json::from_slice(raw).map_err(|_| ProtocolError::InvalidJson)?;

        let serde_json::Value::Object(fields) = value else {
            return Err(ProtocolError::InvalidJson);
        };

        match fields.get("address").and_then(serde_json::Value::as_str) {
            Some(address) => Self::new(address),
            None => Err(ProtocolError::MissingAddress),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Why an address came back invalid. Kept for logs only; never sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    MissingCredential,
    RequestFailed,
    AddressRejected,
    MalformedResponse,
    Connection,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FailureReason::MissingCredential => "Missing USPS API key",
            FailureReason::RequestFailed => "API request failed",
            FailureReason::AddressRejected => "Invalid address",
            FailureReason::MalformedResponse => "Malformed API response",
            FailureReason::Connection => "API connection error",
        };
        f.write_str(text)
    }
}

/// Outcome of one validation. A corrected address exists only on the `Valid` side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid { corrected_address: String },
    Invalid { reason: Option<FailureReason> },
}

impl ValidationResult {
    pub fn valid(corrected_address: impl Into<String>) -> Self {
        ValidationResult::Valid {
            corrected_address: corrected_address.into(),
        }
    }

    pub fn invalid() -> Self {
        ValidationResult::Invalid { reason: None }
    }

    pub fn rejected(reason: FailureReason) -> Self {
        ValidationResult::Invalid {
            reason: Some(reason),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid { .. })
    }

    pub fn corrected_address(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid { corrected_address } => Some(corrected_address),
            ValidationResult::Invalid { .. } => None,
        }
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            ValidationResult::Valid { .. } => None,
            ValidationResult::Invalid { reason } => *reason,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireStatus {
    Valid,
    Invalid,
}

/// The only two reply shapes the service ever emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireResponse {
    Outcome {
        status: WireStatus,
        corrected_address: String,
    },
    Error {
        error: String,
    },
}

impl WireResponse {
    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize reply: {}", e);
                r#"{"status":"invalid","corrected_address":""}"#.to_string()
            }
        }
    }
}

#[cfg(feature = "cli")]
pub mod cli;
pub mod credentials;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_UPSTREAM_ENDPOINT: &str = "https://secure.shippingapis.com/ShippingAPI.dll";
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Which validator answers requests for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Placeholder rule, no network access
    #[default]
    Mock,
    /// Third-party USPS address verification
    #[cfg_attr(feature = "cli", value(alias = "usps"))]
    External,
}

impl std::fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationMode::Mock => f.write_str("MOCK"),
            ValidationMode::External => f.write_str("EXTERNAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_UPSTREAM_ENDPOINT.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

/// Process-wide settings, built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceConfig {
    pub mode: ValidationMode,
    pub credential: Option<String>,
    pub upstream: UpstreamConfig,
}

impl ServiceConfig {
    pub fn mock() -> Self {
        Self::default()
    }

    pub fn external(credential: Option<String>) -> Self {
        Self {
            mode: ValidationMode::External,
            credential: credential.filter(|key| !key.trim().is_empty()),
            upstream: UpstreamConfig::default(),
        }
    }

    pub fn with_upstream(mut self, upstream: UpstreamConfig) -> Self {
        self.upstream = upstream;
        self
    }
}

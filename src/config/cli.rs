use crate::config::credentials::CredentialStore;
use crate::config::{
    ServiceConfig, UpstreamConfig, ValidationMode, DEFAULT_TIMEOUT_MS, DEFAULT_UPSTREAM_ENDPOINT,
};
use crate::utils::error::Result;
use crate::utils::validation::{validate_endpoint, validate_positive_number, validate_url, Validate};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "address-validator")]
#[command(about = "Validates and standardizes mailing addresses over a ZeroMQ REP socket")]
pub struct CliConfig {
    #[arg(long, value_enum, default_value_t = ValidationMode::Mock)]
    pub mode: ValidationMode,

    #[arg(long, default_value = "tcp://*:5555")]
    pub bind: String,

    #[arg(long, default_value = "config.json", help = "JSON or TOML file holding usps_api_key")]
    pub config: PathBuf,

    #[arg(long, default_value = DEFAULT_UPSTREAM_ENDPOINT)]
    pub upstream_endpoint: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS, help = "Upstream request timeout")]
    pub timeout_ms: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Builds the immutable service configuration. The credential file is only read in
    /// external mode.
    pub fn service_config(&self) -> ServiceConfig {
        let upstream = UpstreamConfig {
            endpoint: self.upstream_endpoint.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
        };

        match self.mode {
            ValidationMode::Mock => ServiceConfig::mock().with_upstream(upstream),
            ValidationMode::External => {
                let credential = CredentialStore::load_or_empty(&self.config).credential();
                ServiceConfig::external(Some(credential)).with_upstream(upstream)
            }
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_endpoint("bind", &self.bind)?;
        validate_url("upstream_endpoint", &self.upstream_endpoint)?;
        validate_positive_number("timeout_ms", self.timeout_ms, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let config = CliConfig::parse_from(["address-validator"]);
        assert_eq!(config.mode, ValidationMode::Mock);
        assert_eq!(config.bind, "tcp://*:5555");
        assert_eq!(config.timeout_ms, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_usps_alias() {
        let config = CliConfig::parse_from(["address-validator", "--mode", "usps"]);
        assert_eq!(config.mode, ValidationMode::External);
    }

    #[test]
    fn test_mock_mode_skips_credential_file() {
        let config = CliConfig::parse_from([
            "address-validator",
            "--config",
            "/definitely/not/here.json",
        ]);
        let service = config.service_config();
        assert_eq!(service.mode, ValidationMode::Mock);
        assert_eq!(service.credential, None);
    }

    #[test]
    fn test_external_mode_with_missing_file_has_no_credential() {
        let config = CliConfig::parse_from([
            "address-validator",
            "--mode",
            "external",
            "--config",
            "/definitely/not/here.json",
        ]);
        let service = config.service_config();
        assert_eq!(service.mode, ValidationMode::External);
        assert_eq!(service.credential, None);
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let config = CliConfig::parse_from(["address-validator", "--timeout-ms", "0"]);
        assert!(config.validate().is_err());
    }
}

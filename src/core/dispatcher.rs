use crate::adapters::{MockValidator, UspsValidator};
use crate::config::{ServiceConfig, ValidationMode};
use crate::domain::model::{AddressRequest, ValidationResult};
use crate::domain::ports::Validator;
use crate::utils::error::Result;

/// Routes every request to the validator chosen at startup.
pub struct Dispatcher {
    config: ServiceConfig,
    validator: Box<dyn Validator>,
}

impl Dispatcher {
    pub fn from_config(config: ServiceConfig) -> Result<Self> {
        let validator: Box<dyn Validator> = match config.mode {
            ValidationMode::Mock => Box::new(MockValidator::new()),
            ValidationMode::External => {
                if config.credential.is_none() {
                    tracing::warn!("No USPS API key configured; every address will be invalid");
                }
                Box::new(UspsValidator::new(&config)?)
            }
        };
        Ok(Self::with_validator(config, validator))
    }

    pub fn with_validator(config: ServiceConfig, validator: Box<dyn Validator>) -> Self {
        Self { config, validator }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn validator_name(&self) -> &'static str {
        self.validator.name()
    }

    pub async fn validate(&self, request: &AddressRequest) -> ValidationResult {
        let result = self.validator.validate(request).await;
        if let Some(reason) = result.failure_reason() {
            tracing::info!(
                validator = self.validator.name(),
                "Address rejected: {}",
                reason
            );
        }
        result
    }
}

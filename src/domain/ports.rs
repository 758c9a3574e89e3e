use crate::domain::model::{AddressRequest, ValidationResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// An address-validation backend. Failures are reported as invalid results, never as errors.
#[async_trait]
pub trait Validator: Send + Sync {
    fn name(&self) -> &'static str;
    async fn validate(&self, request: &AddressRequest) -> ValidationResult;
}

/// A strict request/reply endpoint: every `receive` must be followed by exactly one `reply`.
#[async_trait]
pub trait ReplyChannel: Send {
    async fn receive(&mut self) -> Result<Vec<u8>>;
    async fn reply(&mut self, payload: String) -> Result<()>;
}

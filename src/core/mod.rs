pub mod dispatcher;
pub mod listener;
pub mod response;

pub use crate::domain::model::{AddressRequest, FailureReason, ValidationResult, WireResponse};
pub use crate::domain::ports::{ReplyChannel, Validator};
pub use crate::utils::error::Result;

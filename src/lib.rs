pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{MockValidator, UspsValidator, ZmqReplyChannel};
pub use config::{ServiceConfig, UpstreamConfig, ValidationMode};
pub use self::core::{dispatcher::Dispatcher, listener::Listener};
pub use domain::model::{AddressRequest, FailureReason, ValidationResult, WireResponse, WireStatus};
pub use utils::error::{ProtocolError, Result, ServiceError};

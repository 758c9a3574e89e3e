use crate::domain::model::{ValidationResult, WireResponse, WireStatus};
use crate::utils::error::ProtocolError;

/// Maps a validation outcome onto the wire. The failure reason is dropped.
pub fn build_response(result: &ValidationResult) -> WireResponse {
    match result {
        ValidationResult::Valid { corrected_address } => WireResponse::Outcome {
            status: WireStatus::Valid,
            corrected_address: corrected_address.clone(),
        },
        ValidationResult::Invalid { .. } => WireResponse::Outcome {
            status: WireStatus::Invalid,
            corrected_address: String::new(),
        },
    }
}

impl From<&ValidationResult> for WireResponse {
    fn from(result: &ValidationResult) -> Self {
        build_response(result)
    }
}

impl From<ProtocolError> for WireResponse {
    fn from(error: ProtocolError) -> Self {
        WireResponse::Error {
            error: error.to_string(),
        }
    }
}

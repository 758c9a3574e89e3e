use crate::domain::model::{AddressRequest, ValidationResult};
use crate::domain::ports::Validator;
use async_trait::async_trait;

/// Marker that makes an address pass the placeholder rule. Case-sensitive.
pub const ACCEPTED_CITY: &str = "Corvallis";

/// Placeholder validator: accepts any address mentioning [`ACCEPTED_CITY`] and returns it in
/// title case. This is not real address validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockValidator;

impl MockValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn check(address: &str) -> ValidationResult {
        if address.contains(ACCEPTED_CITY) {
            ValidationResult::valid(title_case(address))
        } else {
            ValidationResult::invalid()
        }
    }
}

#[async_trait]
impl Validator for MockValidator {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn validate(&self, request: &AddressRequest) -> ValidationResult {
        Self::check(request.address())
    }
}

/// Uppercases the first character of each whitespace-delimited word and lowercases the rest.
/// Whitespace is preserved as-is.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;

    for ch in input.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }

    out
}

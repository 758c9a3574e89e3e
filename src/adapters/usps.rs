use crate::config::ServiceConfig;
use crate::domain::model::{AddressRequest, FailureReason, ValidationResult};
use crate::domain::ports::Validator;
use crate::utils::error::Result;
use async_trait::async_trait;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use reqwest::{Client, StatusCode};

/// Validator backed by the USPS `Verify` API.
///
/// Only the address line is sent; city, state and ZIP are left blank, which limits how much
/// the upstream can correct.
pub struct UspsValidator {
    client: Client,
    endpoint: String,
    credential: Option<String>,
}

impl UspsValidator {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.upstream.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.upstream.endpoint.clone(),
            credential: config
                .credential
                .clone()
                .filter(|key| !key.trim().is_empty()),
        })
    }

    async fn verify(&self, credential: &str, address: &str) -> ValidationResult {
        let payload = build_request_xml(credential, address);
        tracing::debug!("Making verify request to: {}", self.endpoint);

        let response = match self
            .client
            .get(&self.endpoint)
            .query(&[("API", "Verify"), ("XML", payload.as_str())])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Verify request did not complete: {}", e);
                return ValidationResult::rejected(FailureReason::Connection);
            }
        };

        tracing::debug!("Verify response status: {}", response.status());
        if response.status() != StatusCode::OK {
            return ValidationResult::rejected(FailureReason::RequestFailed);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to read verify response body: {}", e);
                return ValidationResult::rejected(FailureReason::Connection);
            }
        };

        match parse_verify_response(&body) {
            Ok(VerifyResponse::Standardized(address)) => ValidationResult::valid(address),
            Ok(VerifyResponse::Rejected) => {
                ValidationResult::rejected(FailureReason::AddressRejected)
            }
            Err(e) => {
                tracing::warn!("Unreadable verify response: {}", e);
                ValidationResult::rejected(FailureReason::MalformedResponse)
            }
        }
    }
}

#[async_trait]
impl Validator for UspsValidator {
    fn name(&self) -> &'static str {
        "usps"
    }

    async fn validate(&self, request: &AddressRequest) -> ValidationResult {
        match &self.credential {
            Some(credential) => self.verify(credential, request.address()).await,
            None => ValidationResult::rejected(FailureReason::MissingCredential),
        }
    }
}

pub fn build_request_xml(credential: &str, address: &str) -> String {
    format!(
        concat!(
            "<AddressValidateRequest USERID=\"{}\">",
            "<Revision>1</Revision>",
            "<Address ID=\"0\">",
            "<Address1></Address1>",
            "<Address2>{}</Address2>",
            "<City></City>",
            "<State></State>",
            "<Zip5></Zip5>",
            "<Zip4></Zip4>",
            "</Address>",
            "</AddressValidateRequest>"
        ),
        escape(credential),
        escape(address)
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyResponse {
    Standardized(String),
    Rejected,
}

#[derive(Debug, thiserror::Error)]
pub enum ResponseParseError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("response has no Address element")]
    NoAddress,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    AddressLine,
    City,
    State,
    Zip5,
}

#[derive(Debug, Default)]
struct AddressFields {
    address_line: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip5: Option<String>,
}

impl AddressFields {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::AddressLine => &mut self.address_line,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::Zip5 => &mut self.zip5,
        }
    }

    /// Keeps the first value seen for each field.
    fn record(&mut self, field: Field, text: &str) {
        let slot = self.slot(field);
        if slot.is_none() {
            *slot = Some(text.trim().to_string());
        }
    }

    fn compose(&self) -> String {
        let part = |value: &Option<String>| value.clone().unwrap_or_default();
        format!(
            "{}, {}, {} {}",
            part(&self.address_line),
            part(&self.city),
            part(&self.state),
            part(&self.zip5)
        )
        .trim()
        .to_string()
    }
}

/// Reads an `AddressValidateResponse` document. Any `Error` element rejects the address;
/// a document without an `Address` element is treated as unreadable.
/// Unlike plain substring scraping, a non-XML 200 body is therefore never reported as valid.
pub fn parse_verify_response(body: &str) -> std::result::Result<VerifyResponse, ResponseParseError> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut fields = AddressFields::default();
    let mut current: Option<Field> = None;
    let mut saw_address = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                current = None;
                match e.local_name().as_ref() {
                    b"Error" => return Ok(VerifyResponse::Rejected),
                    b"Address" => saw_address = true,
                    b"Address2" => current = Some(Field::AddressLine),
                    b"City" => current = Some(Field::City),
                    b"State" => current = Some(Field::State),
                    b"Zip5" => current = Some(Field::Zip5),
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"Error" {
                    return Ok(VerifyResponse::Rejected);
                }
            }
            Event::Text(text) => {
                if let Some(field) = current {
                    fields.record(field, &text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(field) = current {
                    fields.record(field, &String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => current = None,
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_address {
        return Err(ResponseParseError::NoAddress);
    }

    Ok(VerifyResponse::Standardized(fields.compose()))
}

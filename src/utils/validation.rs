use crate::utils::error::{Result, ServiceError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty".to_string()));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

/// Accepts the ZeroMQ transports the service can bind: `tcp://host:port` and `ipc://path`.
pub fn validate_endpoint(field_name: &str, endpoint: &str) -> Result<()> {
    let rest = if let Some(rest) = endpoint.strip_prefix("tcp://") {
        match rest.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => return Ok(()),
            _ => rest,
        }
    } else if let Some(path) = endpoint.strip_prefix("ipc://") {
        if path.is_empty() {
            return Err(invalid(field_name, endpoint, "IPC path cannot be empty".to_string()));
        }
        return Ok(());
    } else {
        return Err(invalid(
            field_name,
            endpoint,
            "Endpoint must start with tcp:// or ipc://".to_string(),
        ));
    };

    Err(invalid(
        field_name,
        endpoint,
        format!("Expected host:port after tcp://, got '{}'", rest),
    ))
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

fn invalid(field_name: &str, value: &str, reason: String) -> ServiceError {
    ServiceError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason,
    }
}

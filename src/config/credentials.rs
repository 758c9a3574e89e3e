use crate::utils::error::{Result, ServiceError};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

/// Key holding the upstream verifier credential.
pub const CREDENTIAL_KEY: &str = "usps_api_key";

/// Flat key-value settings read from a JSON or TOML file.
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    values: HashMap<String, String>,
}

impl CredentialStore {
    /// Loads the store, treating a missing or unreadable file as empty.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(
                    "Could not read credentials from {}: {}; continuing without them",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// `.toml` files are parsed as TOML, anything else as JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        let value: serde_json::Value = serde_json::from_str(&processed)?;
        let serde_json::Value::Object(fields) = value else {
            return Err(ServiceError::ConfigError {
                message: "credential file must contain a JSON object".to_string(),
            });
        };

        let values = fields
            .into_iter()
            .filter_map(|(key, value)| value.as_str().map(|v| (key, v.to_string())))
            .collect();
        Ok(Self { values })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        let table: toml::Table =
            toml::from_str(&processed).map_err(|e| ServiceError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;

        let values = table
            .into_iter()
            .filter_map(|(key, value)| value.as_str().map(|v| (key, v.to_string())))
            .collect();
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// The trimmed credential, or an empty string when absent.
    pub fn credential(&self) -> String {
        self.get(CREDENTIAL_KEY)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }
}

/// Replaces `${VAR}` with the environment value; unknown variables are left as written.
fn substitute_env_vars(content: &str) -> String {
    let Ok(re) = Regex::new(r"\$\{([^}]+)\}") else {
        return content.to_string();
    };

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}

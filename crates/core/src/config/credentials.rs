//! API key loading.
//!
//! The key is read once at startup and handed to the model client. Nothing
//! else in the crate reads the environment for it.

use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("missing credential: environment variable {0} is not set or empty")]
    MissingCredential(String),
}

/// A model API key. Redacted in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Read the API key from the environment variable `var`.
pub fn load_api_key(var: &str) -> Result<ApiKey, CredentialError> {
    key_from_value(var, std::env::var(var).ok())
}

fn key_from_value(var: &str, value: Option<String>) -> Result<ApiKey, CredentialError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(ApiKey(key.trim().to_string())),
        _ => Err(CredentialError::MissingCredential(var.to_string())),
    }
}

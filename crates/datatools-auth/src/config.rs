//! Application configuration.

use datatools_auth_core::ClientId;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable holding the application's OAuth client id.
pub const CLIENT_ID_ENV: &str = "AUTH0_CLIENT_ID";

/// Configuration for building user authorizations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Selects which settings blob in a profile applies to this application.
    pub client_id: ClientId,
}

impl AuthConfig {
    /// Create a config for the given client.
    pub fn new(client_id: impl Into<ClientId>) -> Self {
        Self {
            client_id: client_id.into(),
        }
    }

    /// Read the client id from [`CLIENT_ID_ENV`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let client_id = lookup(CLIENT_ID_ENV)
            .map(|id| ClientId::new(id.trim()))
            .filter(|id| !id.is_empty())
            .ok_or(ConfigError::MissingClientId(CLIENT_ID_ENV))?;
        Ok(Self { client_id })
    }
}

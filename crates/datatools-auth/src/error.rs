//! Error types for profile loading and sessions.

use datatools_auth_core::SettingsError;
use thiserror::Error;

/// Errors from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No client id configured.
    #[error("missing client id: set {0}")]
    MissingClientId(&'static str),
}

/// Errors that can occur during profile and session operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Settings could not be read or written.
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Profile could not be decoded.
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    /// Profile file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The profile source rejected the access token.
    #[error("unknown access token")]
    UnknownToken,

    /// The profile source has no such user.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// Operation needs a logged-in user.
    #[error("not logged in")]
    NotLoggedIn,
}

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

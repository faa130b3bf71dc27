//! Degradation reasons for permission and subscription construction.
//!
//! Building lookups from a profile never fails. When the profile is not
//! shaped as expected the lookups are built empty and the reason is
//! reported alongside them.

use datatools_auth_core::ClientId;
use thiserror::Error;

/// Why a lookup was built empty instead of from the profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DegradedReason {
    /// The datatools metadata was present but not a list.
    #[error("datatools metadata is not a list (found {0})")]
    NotAList(&'static str),

    /// The datatools metadata was neither a list nor a settings object.
    #[error("datatools metadata is not a settings object or list (found {0})")]
    NotAnObject(&'static str),

    /// No settings blob carries the configured client id.
    #[error("no datatools settings for client {0}")]
    NoMatchingClient(ClientId),

    /// The matching settings blob could not be decoded.
    #[error("malformed datatools settings: {0}")]
    MalformedSettings(String),
}

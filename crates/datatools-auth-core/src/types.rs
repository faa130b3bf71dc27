//! Strong type definitions for datatools settings.
//!
//! Identifiers that cross the identity-provider boundary are newtypes or
//! closed enums so they cannot be confused with arbitrary strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Feed list entry that stands for every feed in a project.
pub const FEED_WILDCARD: &str = "*";

/// The OAuth client id of a running datatools application.
///
/// A user profile carries one settings blob per client; the configured
/// client id picks which one applies.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Create a new client id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClientId({})", self.0)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ClientId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for ClientId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// A capability that can be granted at application, organization or
/// project level.
///
/// Serialized as the literal strings the identity provider stores. Types
/// this crate does not know are kept verbatim in [`PermissionType::Other`]
/// so that a settings blob round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PermissionType {
    AdministerApplication,
    AdministerOrganization,
    AdministerProject,
    ManageFeed,
    ViewFeed,
    EditGtfs,
    ApproveGtfs,
    EditAlert,
    ApproveAlert,
    EditEtid,
    Other(String),
}

impl PermissionType {
    /// The wire literal for this permission type.
    pub fn as_str(&self) -> &str {
        match self {
            PermissionType::AdministerApplication => "administer-application",
            PermissionType::AdministerOrganization => "administer-organization",
            PermissionType::AdministerProject => "administer-project",
            PermissionType::ManageFeed => "manage-feed",
            PermissionType::ViewFeed => "view-feed",
            PermissionType::EditGtfs => "edit-gtfs",
            PermissionType::ApproveGtfs => "approve-gtfs",
            PermissionType::EditAlert => "edit-alert",
            PermissionType::ApproveAlert => "approve-alert",
            PermissionType::EditEtid => "edit-etid",
            PermissionType::Other(s) => s,
        }
    }

    /// Whether this is one of the three administrator types.
    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            PermissionType::AdministerApplication
                | PermissionType::AdministerOrganization
                | PermissionType::AdministerProject
        )
    }
}

impl From<&str> for PermissionType {
    fn from(s: &str) -> Self {
        match s {
            "administer-application" => PermissionType::AdministerApplication,
            "administer-organization" => PermissionType::AdministerOrganization,
            "administer-project" => PermissionType::AdministerProject,
            "manage-feed" => PermissionType::ManageFeed,
            "view-feed" => PermissionType::ViewFeed,
            "edit-gtfs" => PermissionType::EditGtfs,
            "approve-gtfs" => PermissionType::ApproveGtfs,
            "edit-alert" => PermissionType::EditAlert,
            "approve-alert" => PermissionType::ApproveAlert,
            "edit-etid" => PermissionType::EditEtid,
            other => PermissionType::Other(other.to_string()),
        }
    }
}

impl From<String> for PermissionType {
    fn from(s: String) -> Self {
        match PermissionType::from(s.as_str()) {
            PermissionType::Other(_) => PermissionType::Other(s),
            known => known,
        }
    }
}

impl From<PermissionType> for String {
    fn from(t: PermissionType) -> Self {
        match t {
            PermissionType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PermissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! The datatools settings blob stored in a user profile.
//!
//! A profile's `app_metadata.datatools` value is a list of these blobs, one
//! per client application. Field names here are the identity provider's and
//! must not change.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{json_kind, Result, SettingsError};
use crate::types::{ClientId, PermissionType, FEED_WILDCARD};

/// A single granted capability, optionally limited to a set of feeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// What is granted.
    #[serde(rename = "type")]
    pub permission_type: PermissionType,

    /// Feeds this grant is limited to. `"*"` means every feed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feeds: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Permission {
    /// Create a permission with no feed list.
    pub fn new(permission_type: PermissionType) -> Self {
        Self {
            permission_type,
            feeds: None,
            module: None,
            name: None,
        }
    }

    /// Create a permission limited to the given feeds.
    pub fn for_feeds<I, S>(permission_type: PermissionType, feeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            feeds: Some(feeds.into_iter().map(Into::into).collect()),
            ..Self::new(permission_type)
        }
    }

    /// Create a permission covering every feed.
    pub fn all_feeds(permission_type: PermissionType) -> Self {
        Self::for_feeds(permission_type, [FEED_WILDCARD])
    }

    /// The feed list, empty when absent.
    pub fn feeds(&self) -> &[String] {
        self.feeds.as_deref().unwrap_or_default()
    }
}

/// Permissions a user holds within one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationScope {
    /// Empty when the entry has no id; such an entry grants nothing.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub organization_id: String,

    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl OrganizationScope {
    /// Find a permission of the given type in this organization.
    pub fn permission(&self, permission_type: &PermissionType) -> Option<&Permission> {
        self.permissions
            .iter()
            .find(|p| &p.permission_type == permission_type)
    }
}

/// Permissions a user holds within one project.
///
/// This is the permission-configuration shape nested in a profile, not the
/// project entity managed by the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectScope {
    /// Empty when the entry has no id; such an entry grants nothing.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_id: String,

    #[serde(default)]
    pub permissions: Vec<Permission>,

    /// Feeds every permission in this project applies to.
    #[serde(rename = "defaultFeeds", default)]
    pub default_feeds: Vec<String>,
}

impl ProjectScope {
    /// Find a permission of the given type in this project.
    pub fn permission(&self, permission_type: &PermissionType) -> Option<&Permission> {
        self.permissions
            .iter()
            .find(|p| &p.permission_type == permission_type)
    }
}

/// A notification subscription and the projects/feeds it targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(rename = "type")]
    pub subscription_type: String,

    #[serde(default)]
    pub target: Vec<String>,
}

impl Subscription {
    /// Whether the target list names `id`.
    pub fn targets(&self, id: &str) -> bool {
        self.target.iter().any(|t| t == id)
    }
}

/// Per-client settings blob from `app_metadata.datatools`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatatoolsSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,

    /// Application-level permissions.
    #[serde(default)]
    pub permissions: Vec<Permission>,

    #[serde(default)]
    pub organizations: Vec<OrganizationScope>,

    #[serde(default)]
    pub projects: Vec<ProjectScope>,

    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

impl DatatoolsSettings {
    /// Create an empty blob for a client.
    pub fn for_client(client_id: ClientId) -> Self {
        Self {
            client_id: Some(client_id),
            ..Self::default()
        }
    }

    /// Whether this blob belongs to `client_id`.
    pub fn is_for(&self, client_id: &ClientId) -> bool {
        self.client_id.as_ref() == Some(client_id)
    }

    /// Decode a blob from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(SettingsError::decoding)
    }

    /// Decode a blob from a JSON value.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(SettingsError::decoding)
    }

    /// Encode this blob as JSON text.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(SettingsError::encoding)
    }

    /// Encode this blob as a JSON value.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(SettingsError::encoding)
    }

    /// Add `target` to the subscription of `subscription_type`, or remove it
    /// if it is already targeted.
    ///
    /// Returns a new blob. A missing subscription is created; one whose
    /// target list becomes empty is dropped.
    pub fn toggle_subscription_target(&self, subscription_type: &str, target: &str) -> Self {
        let mut next = self.clone();
        match next
            .subscriptions
            .iter()
            .position(|s| s.subscription_type == subscription_type)
        {
            Some(index) => {
                let sub = &mut next.subscriptions[index];
                if sub.targets(target) {
                    sub.target.retain(|t| t != target);
                    if sub.target.is_empty() {
                        next.subscriptions.remove(index);
                    }
                } else {
                    sub.target.push(target.to_string());
                }
            }
            None => next.subscriptions.push(Subscription {
                subscription_type: subscription_type.to_string(),
                target: vec![target.to_string()],
            }),
        }
        next
    }
}

/// Find the element of a raw `app_metadata.datatools` list that belongs to
/// `client_id`.
pub fn find_client_settings<'a>(items: &'a [Value], client_id: &ClientId) -> Option<&'a Value> {
    items.iter().find(|item| {
        item.get("client_id")
            .and_then(Value::as_str)
            .is_some_and(|id| client_id == id)
    })
}

/// Write `settings` into a raw `app_metadata.datatools` value.
///
/// The element with the same client id is replaced; if there is none the
/// blob is appended. Other clients' blobs are left untouched. A missing
/// (`null`) value becomes a one-element list.
pub fn merge_into_datatools(datatools: &Value, settings: &DatatoolsSettings) -> Result<Value> {
    let encoded = settings.to_value()?;
    let mut items = match datatools {
        Value::Null => Vec::new(),
        Value::Array(items) => items.clone(),
        other => return Err(SettingsError::NotAList(json_kind(other))),
    };

    let existing = settings.client_id.as_ref().and_then(|client_id| {
        items.iter().position(|item| {
            item.get("client_id")
                .and_then(Value::as_str)
                .is_some_and(|id| client_id == id)
        })
    });

    match existing {
        Some(index) => items[index] = encoded,
        None => items.push(encoded),
    }
    Ok(Value::Array(items))
}

//! User profiles and the authorization built from them.
//!
//! The identity provider returns a profile whose `app_metadata.datatools`
//! value carries the per-client settings. A [`UserAuthorization`] is built
//! from that value every time the profile changes and is never updated in
//! place.

use std::path::Path;

use datatools_auth_core::{
    find_client_settings, json_kind, merge_into_datatools, DatatoolsSettings, SettingsError,
};
use datatools_auth_perms::{DegradedReason, UserPermissions, UserSubscriptions};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};

/// Provider-managed metadata attached to a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Raw settings list, kept untyped so one malformed client blob cannot
    /// make the whole profile unreadable.
    #[serde(default)]
    pub datatools: Value,
}

/// A user profile as returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub app_metadata: AppMetadata,
}

impl UserProfile {
    /// Create a profile with no datatools settings.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
            app_metadata: AppMetadata::default(),
        }
    }

    /// Decode a profile from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AuthError::InvalidProfile(e.to_string()))
    }

    /// Read a profile from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The raw `app_metadata.datatools` value, if set.
    pub fn datatools(&self) -> Option<&Value> {
        match &self.app_metadata.datatools {
            Value::Null => None,
            value => Some(value),
        }
    }

    /// The settings blob for the configured client, if present.
    ///
    /// A blob that exists but cannot be decoded is an error, never `None`:
    /// callers that write settings back must not mistake it for a missing
    /// blob and overwrite it.
    pub fn client_settings(&self, config: &AuthConfig) -> Result<Option<DatatoolsSettings>> {
        let items = match self.datatools() {
            None => return Ok(None),
            Some(Value::Array(items)) => items,
            Some(other) => return Err(SettingsError::NotAList(json_kind(other)).into()),
        };
        let settings = find_client_settings(items, &config.client_id)
            .map(DatatoolsSettings::from_value)
            .transpose()?;
        Ok(settings)
    }

    /// Return a copy of this profile with `settings` stored for its client.
    pub fn with_settings(&self, settings: &DatatoolsSettings) -> Result<Self> {
        let datatools = merge_into_datatools(&self.app_metadata.datatools, settings)?;
        let mut next = self.clone();
        next.app_metadata.datatools = datatools;
        Ok(next)
    }

    /// Return a copy of this profile with `target` toggled in the
    /// `subscription_type` subscription of the configured client.
    pub fn toggle_subscription(
        &self,
        config: &AuthConfig,
        subscription_type: &str,
        target: &str,
    ) -> Result<Self> {
        let current = self
            .client_settings(config)?
            .unwrap_or_else(|| DatatoolsSettings::for_client(config.client_id.clone()));
        self.with_settings(&current.toggle_subscription_target(subscription_type, target))
    }
}

/// Everything the console needs to gate a user's actions.
#[derive(Debug, Clone)]
pub struct UserAuthorization {
    user_id: Option<String>,
    email: Option<String>,
    permissions: UserPermissions,
    subscriptions: UserSubscriptions,
    degraded: Vec<DegradedReason>,
}

impl UserAuthorization {
    /// Build from a profile.
    pub fn from_profile(profile: &UserProfile, config: &AuthConfig) -> Self {
        let datatools = profile.datatools();
        let (permissions, perms_reason) =
            UserPermissions::from_value(datatools, &config.client_id).into_parts();
        let (subscriptions, subs_reason) =
            UserSubscriptions::from_value(datatools, &config.client_id).into_parts();

        let mut degraded: Vec<DegradedReason> = perms_reason.into_iter().collect();
        if let Some(reason) = subs_reason {
            if !degraded.contains(&reason) {
                degraded.push(reason);
            }
        }

        Self {
            user_id: Some(profile.user_id.clone()),
            email: profile.email.clone(),
            permissions,
            subscriptions,
            degraded,
        }
    }

    /// The unauthenticated public user: no permissions, no subscriptions.
    pub fn public() -> Self {
        Self {
            user_id: None,
            email: None,
            permissions: UserPermissions::empty(),
            subscriptions: UserSubscriptions::empty(),
            degraded: Vec::new(),
        }
    }

    /// Whether this is the public user.
    pub fn is_public(&self) -> bool {
        self.user_id.is_none()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn permissions(&self) -> &UserPermissions {
        &self.permissions
    }

    pub fn subscriptions(&self) -> &UserSubscriptions {
        &self.subscriptions
    }

    /// Why the profile could not be fully used, if it could not.
    pub fn degraded_reasons(&self) -> &[DegradedReason] {
        &self.degraded
    }
}

//! User notification subscriptions.

use std::collections::HashMap;

use datatools_auth_core::{
    find_client_settings, json_kind, ClientId, DatatoolsSettings, Subscription,
};
use serde_json::Value;

use crate::construction::Construction;
use crate::error::DegradedReason;

/// Settings to build subscriptions from.
#[derive(Debug, Clone, Copy)]
pub enum SettingsInput<'a> {
    /// A profile's full list; the blob for the configured client is used.
    List(&'a [DatatoolsSettings]),
    /// A blob that has already been selected.
    Single(&'a DatatoolsSettings),
}

/// Subscription lookups for a single user, keyed by subscription type.
#[derive(Debug, Clone, Default)]
pub struct UserSubscriptions {
    subscriptions: HashMap<String, Subscription>,
}

impl UserSubscriptions {
    /// No subscriptions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from typed settings.
    pub fn new(input: Option<SettingsInput<'_>>, client_id: &ClientId) -> Construction<Self> {
        match input {
            None => Construction::Clean(Self::empty()),
            Some(SettingsInput::Single(settings)) => {
                Construction::Clean(Self::from_client_settings(settings))
            }
            Some(SettingsInput::List(items)) => match items.iter().find(|s| s.is_for(client_id)) {
                Some(selected) => Construction::Clean(Self::from_client_settings(selected)),
                None => degraded(DegradedReason::NoMatchingClient(client_id.clone())),
            },
        }
    }

    /// Build from the raw `app_metadata.datatools` value.
    ///
    /// A list selects the blob for `client_id`; an object is used as the blob
    /// itself.
    pub fn from_value(datatools: Option<&Value>, client_id: &ClientId) -> Construction<Self> {
        let selected = match datatools {
            None | Some(Value::Null) => return Construction::Clean(Self::empty()),
            Some(Value::Array(items)) => match find_client_settings(items, client_id) {
                Some(selected) => selected,
                None => return degraded(DegradedReason::NoMatchingClient(client_id.clone())),
            },
            Some(object @ Value::Object(_)) => object,
            Some(other) => return degraded(DegradedReason::NotAnObject(json_kind(other))),
        };

        match DatatoolsSettings::from_value(selected) {
            Ok(settings) => Construction::Clean(Self::from_client_settings(&settings)),
            Err(e) => degraded(DegradedReason::MalformedSettings(e.to_string())),
        }
    }

    /// Build from an already selected settings blob.
    pub fn from_client_settings(settings: &DatatoolsSettings) -> Self {
        Self {
            subscriptions: settings
                .subscriptions
                .iter()
                .map(|s| (s.subscription_type.clone(), s.clone()))
                .collect(),
        }
    }

    /// Whether the user has a subscription of `subscription_type`.
    ///
    /// A type that was never subscribed is `false`.
    pub fn has_subscription(&self, subscription_type: &str) -> bool {
        self.subscriptions.contains_key(subscription_type)
    }

    /// Get the subscription of `subscription_type`.
    pub fn get_subscription(&self, subscription_type: &str) -> Option<&Subscription> {
        self.subscriptions.get(subscription_type)
    }

    /// Subscribed types, in no particular order.
    pub fn subscription_types(&self) -> impl Iterator<Item = &str> {
        self.subscriptions.keys().map(String::as_str)
    }

    /// Whether the `subscription_type` subscription targets `project_id`.
    ///
    /// `None` when there is no such subscription.
    pub fn has_project_subscription(
        &self,
        project_id: &str,
        subscription_type: &str,
    ) -> Option<bool> {
        self.get_subscription(subscription_type)
            .map(|s| s.targets(project_id))
    }

    /// Whether the `subscription_type` subscription targets `feed_id`,
    /// either directly or through its project.
    ///
    /// `None` when there is no such subscription.
    pub fn has_feed_subscription(
        &self,
        project_id: &str,
        feed_id: &str,
        subscription_type: &str,
    ) -> Option<bool> {
        self.get_subscription(subscription_type)
            .map(|s| s.targets(project_id) || s.targets(feed_id))
    }
}

fn degraded(reason: DegradedReason) -> Construction<UserSubscriptions> {
    tracing::warn!(%reason, "user subscriptions built empty");
    Construction::degraded(UserSubscriptions::empty(), reason)
}

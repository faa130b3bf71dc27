//! ProfileSource trait: where user profiles come from.
//!
//! The identity provider is remote; this trait keeps the session layer
//! independent of how profiles are fetched. An in-memory implementation is
//! provided for tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{AuthError, Result};
use crate::profile::UserProfile;

/// Async interface to the identity provider.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Fetch the profile of the user an access token belongs to.
    async fn fetch_profile(&self, token: &str) -> Result<UserProfile>;

    /// Replace a user's `app_metadata.datatools` value and return the
    /// updated profile.
    async fn update_datatools(&self, user_id: &str, datatools: Value) -> Result<UserProfile>;
}

/// In-memory profile source.
///
/// Maps access tokens to user ids and user ids to profiles.
#[derive(Default)]
pub struct MemoryProfileSource {
    inner: RwLock<MemorySourceInner>,
}

#[derive(Default)]
struct MemorySourceInner {
    tokens: HashMap<String, String>,
    profiles: HashMap<String, UserProfile>,
}

impl MemoryProfileSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile reachable through `token`.
    pub async fn insert(&self, token: impl Into<String>, profile: UserProfile) {
        let mut inner = self.inner.write().await;
        inner.tokens.insert(token.into(), profile.user_id.clone());
        inner.profiles.insert(profile.user_id.clone(), profile);
    }

    /// Replace a stored profile, as an administrator editing the user would.
    pub async fn replace(&self, profile: UserProfile) {
        let mut inner = self.inner.write().await;
        inner.profiles.insert(profile.user_id.clone(), profile);
    }

    /// Get a stored profile by user id.
    pub async fn get(&self, user_id: &str) -> Option<UserProfile> {
        self.inner.read().await.profiles.get(user_id).cloned()
    }
}

#[async_trait]
impl ProfileSource for MemoryProfileSource {
    async fn fetch_profile(&self, token: &str) -> Result<UserProfile> {
        let inner = self.inner.read().await;
        let user_id = inner.tokens.get(token).ok_or(AuthError::UnknownToken)?;
        inner
            .profiles
            .get(user_id)
            .cloned()
            .ok_or_else(|| AuthError::UserNotFound(user_id.clone()))
    }

    async fn update_datatools(&self, user_id: &str, datatools: Value) -> Result<UserProfile> {
        let mut inner = self.inner.write().await;
        let profile = inner
            .profiles
            .get_mut(user_id)
            .ok_or_else(|| AuthError::UserNotFound(user_id.to_string()))?;
        profile.app_metadata.datatools = datatools;
        Ok(profile.clone())
    }
}

//! The Session: the current user's authorization over its lifecycle.
//!
//! A fresh [`UserAuthorization`] is built on login and on every profile
//! refresh, and discarded on logout. Readers get an `Arc` snapshot, so a
//! swap never exposes a half-built value.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};
use crate::profile::{UserAuthorization, UserProfile};
use crate::source::ProfileSource;

struct LoggedIn {
    /// Generation of the login this state belongs to.
    login: u64,
    token: String,
    profile: UserProfile,
    authorization: Arc<UserAuthorization>,
}

/// Tracks the logged-in user and their authorization.
pub struct Session<P: ProfileSource> {
    /// Where profiles are fetched from.
    source: P,
    /// Configuration.
    config: AuthConfig,
    /// Current login, if any.
    state: RwLock<Option<LoggedIn>>,
    /// Handed out while logged out.
    public: Arc<UserAuthorization>,
    /// Last login generation handed out.
    logins: AtomicU64,
}

impl<P: ProfileSource> Session<P> {
    /// Create a logged-out session.
    pub fn new(source: P, config: AuthConfig) -> Self {
        Self {
            source,
            config,
            state: RwLock::new(None),
            public: Arc::new(UserAuthorization::public()),
            logins: AtomicU64::new(0),
        }
    }

    /// Get the profile source.
    pub fn source(&self) -> &P {
        &self.source
    }

    /// Get the configuration.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Log in with an access token, replacing any current login.
    pub async fn login(&self, token: impl Into<String>) -> Result<Arc<UserAuthorization>> {
        let token = token.into();
        let profile = self.source.fetch_profile(&token).await?;
        tracing::info!(user_id = %profile.user_id, "user logged in");
        self.install(None, token, profile).await
    }

    /// Re-fetch the current user's profile and rebuild their authorization.
    ///
    /// Fails with [`AuthError::NotLoggedIn`] if the user logs out, or another
    /// login replaces theirs, while the profile is being fetched.
    pub async fn refresh(&self) -> Result<Arc<UserAuthorization>> {
        let (login, token) = self
            .state
            .read()
            .await
            .as_ref()
            .map(|s| (s.login, s.token.clone()))
            .ok_or(AuthError::NotLoggedIn)?;

        let profile = self.source.fetch_profile(&token).await?;
        tracing::debug!(user_id = %profile.user_id, "profile refreshed");
        self.install(Some(login), token, profile).await
    }

    /// Drop the current login.
    pub async fn logout(&self) {
        if let Some(previous) = self.state.write().await.take() {
            tracing::info!(user_id = %previous.profile.user_id, "user logged out");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// The current authorization, or the public user when logged out.
    pub async fn current(&self) -> Arc<UserAuthorization> {
        match self.state.read().await.as_ref() {
            Some(state) => Arc::clone(&state.authorization),
            None => Arc::clone(&self.public),
        }
    }

    /// Whether a user is logged in.
    pub async fn is_logged_in(&self) -> bool {
        self.state.read().await.is_some()
    }

    /// The current user's profile.
    pub async fn profile(&self) -> Option<UserProfile> {
        self.state.read().await.as_ref().map(|s| s.profile.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────────────────

    /// Toggle `target` in the current user's `subscription_type`
    /// subscription, store it with the profile source, and rebuild.
    pub async fn toggle_subscription(
        &self,
        subscription_type: &str,
        target: &str,
    ) -> Result<Arc<UserAuthorization>> {
        let (login, token, profile) = self
            .state
            .read()
            .await
            .as_ref()
            .map(|s| (s.login, s.token.clone(), s.profile.clone()))
            .ok_or(AuthError::NotLoggedIn)?;

        let edited = profile.toggle_subscription(&self.config, subscription_type, target)?;
        let stored = self
            .source
            .update_datatools(&edited.user_id, edited.app_metadata.datatools)
            .await?;
        tracing::debug!(
            user_id = %stored.user_id,
            subscription_type,
            target,
            "subscription toggled"
        );
        self.install(Some(login), token, stored).await
    }

    /// Store a freshly built authorization.
    ///
    /// With `expected` set, the state is only replaced while that login is
    /// still current; otherwise a new login generation starts.
    async fn install(
        &self,
        expected: Option<u64>,
        token: String,
        profile: UserProfile,
    ) -> Result<Arc<UserAuthorization>> {
        let authorization = Arc::new(UserAuthorization::from_profile(&profile, &self.config));
        if !authorization.degraded_reasons().is_empty() {
            tracing::debug!(
                user_id = %profile.user_id,
                client_id = %self.config.client_id,
                "profile settings unusable, user has no privileges"
            );
        }

        let mut state = self.state.write().await;
        let login = match expected {
            None => self.logins.fetch_add(1, Ordering::Relaxed) + 1,
            Some(login) if state.as_ref().is_some_and(|s| s.login == login) => login,
            Some(_) => {
                tracing::debug!(
                    user_id = %profile.user_id,
                    "login ended during profile fetch, discarding profile"
                );
                return Err(AuthError::NotLoggedIn);
            }
        };

        *state = Some(LoggedIn {
            login,
            token,
            profile,
            authorization: Arc::clone(&authorization),
        });
        Ok(authorization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryProfileSource;
    use async_trait::async_trait;
    use datatools_auth_core::SettingsBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use tokio::sync::Notify;

    /// Holds `fetch_profile` until released, once armed.
    #[derive(Default)]
    struct GatedSource {
        inner: MemoryProfileSource,
        armed: AtomicBool,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ProfileSource for GatedSource {
        async fn fetch_profile(&self, token: &str) -> Result<UserProfile> {
            if self.armed.load(Ordering::SeqCst) {
                self.entered.notify_one();
                self.release.notified().await;
            }
            self.inner.fetch_profile(token).await
        }

        async fn update_datatools(&self, user_id: &str, datatools: Value) -> Result<UserProfile> {
            self.inner.update_datatools(user_id, datatools).await
        }
    }

    async fn gated_session() -> Arc<Session<GatedSource>> {
        let source = GatedSource::default();
        let settings = SettingsBuilder::new("X").application_admin().build();
        let profile = UserProfile::new("admin").with_settings(&settings).unwrap();
        source.inner.insert("tok", profile).await;
        Arc::new(Session::new(source, AuthConfig::new("X")))
    }

    async fn session_with_admin() -> Session<MemoryProfileSource> {
        let source = MemoryProfileSource::new();
        let settings = SettingsBuilder::new("X").application_admin().build();
        let profile = UserProfile::new("admin").with_settings(&settings).unwrap();
        source.insert("tok", profile).await;
        Session::new(source, AuthConfig::new("X"))
    }

    #[tokio::test]
    async fn test_logged_out_is_public() {
        let session = session_with_admin().await;
        assert!(!session.is_logged_in().await);
        assert!(session.current().await.is_public());
        assert!(matches!(session.refresh().await, Err(AuthError::NotLoggedIn)));
    }

    #[tokio::test]
    async fn test_login_and_logout() {
        let session = session_with_admin().await;

        let auth = session.login("tok").await.unwrap();
        assert!(auth.permissions().is_application_admin());
        assert!(session.current().await.permissions().is_application_admin());
        assert_eq!(session.profile().await.unwrap().user_id, "admin");

        session.logout().await;
        assert!(!session.is_logged_in().await);
        assert!(!session.current().await.permissions().is_application_admin());
    }

    #[tokio::test]
    async fn test_bad_token_keeps_state() {
        let session = session_with_admin().await;
        assert!(matches!(
            session.login("nope").await,
            Err(AuthError::UnknownToken)
        ));
        assert!(!session.is_logged_in().await);
    }

    #[tokio::test]
    async fn test_logout_during_refresh_stays_logged_out() {
        let session = gated_session().await;
        session.login("tok").await.unwrap();
        session.source().armed.store(true, Ordering::SeqCst);

        let refreshing = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.refresh().await }
        });
        session.source().entered.notified().await;

        session.logout().await;
        session.source().release.notify_one();

        let result = refreshing.await.unwrap();
        assert!(matches!(result, Err(AuthError::NotLoggedIn)));
        assert!(!session.is_logged_in().await);
        assert!(session.current().await.is_public());
    }

    #[tokio::test]
    async fn test_relogin_during_refresh_keeps_new_login() {
        let session = gated_session().await;
        session.login("tok").await.unwrap();
        session.source().armed.store(true, Ordering::SeqCst);

        let refreshing = tokio::spawn({
            let session = Arc::clone(&session);
            async move { session.refresh().await }
        });
        session.source().entered.notified().await;

        session.logout().await;
        session.source().armed.store(false, Ordering::SeqCst);
        session.login("tok").await.unwrap();
        session.source().release.notify_one();

        assert!(matches!(refreshing.await.unwrap(), Err(AuthError::NotLoggedIn)));
        assert!(session.is_logged_in().await);
        assert!(session.refresh().await.is_ok());
    }
}

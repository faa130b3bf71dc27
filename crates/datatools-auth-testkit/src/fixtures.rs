//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use datatools_auth::{
    AuthConfig, DatatoolsSettings, MemoryProfileSource, Permission, PermissionType, Session,
    SettingsBuilder, UserAuthorization, UserProfile,
};

use crate::vectors::SCENARIO_CLIENT_ID;

/// A test fixture: a config plus a profile under construction.
pub struct ProfileFixture {
    pub config: AuthConfig,
    pub profile: UserProfile,
}

impl ProfileFixture {
    /// Create a fixture for a user with no settings.
    pub fn new(user_id: &str) -> Self {
        Self {
            config: AuthConfig::new(SCENARIO_CLIENT_ID),
            profile: UserProfile::new(user_id),
        }
    }

    /// Start a settings blob for the fixture's client.
    pub fn settings(&self) -> SettingsBuilder {
        SettingsBuilder::new(self.config.client_id.clone())
    }

    /// Store `settings` in the profile.
    pub fn with_settings(mut self, settings: DatatoolsSettings) -> Self {
        self.profile = self
            .profile
            .with_settings(&settings)
            .expect("fixture profile metadata is a list");
        self
    }

    /// An application administrator.
    pub fn application_admin(user_id: &str) -> Self {
        let fixture = Self::new(user_id);
        let settings = fixture.settings().application_admin().build();
        fixture.with_settings(settings)
    }

    /// A user editing GTFS for the given feeds of one project.
    pub fn gtfs_editor(user_id: &str, project_id: &str, feeds: &[&str]) -> Self {
        let fixture = Self::new(user_id);
        let settings = fixture
            .settings()
            .project(
                project_id,
                vec![Permission::for_feeds(
                    PermissionType::EditGtfs,
                    feeds.iter().copied(),
                )],
                Vec::<String>::new(),
            )
            .build();
        fixture.with_settings(settings)
    }

    /// Build the authorization for the fixture's profile.
    pub fn authorization(&self) -> UserAuthorization {
        UserAuthorization::from_profile(&self.profile, &self.config)
    }

    /// A logged-out session whose source knows this profile under `token`.
    pub async fn session(&self, token: &str) -> Session<MemoryProfileSource> {
        let source = MemoryProfileSource::new();
        source.insert(token, self.profile.clone()).await;
        Session::new(source, self.config.clone())
    }
}

/// Create fixtures for several users of the same client.
pub fn multi_user_fixtures(count: usize) -> Vec<ProfileFixture> {
    (0..count)
        .map(|i| ProfileFixture::new(&format!("user-{i}")))
        .collect()
}

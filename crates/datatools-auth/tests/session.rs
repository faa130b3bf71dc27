//! Session lifecycle tests: login, refresh, logout, and settings edits.

use std::io::Write;
use std::sync::Arc;

use datatools_auth::{
    AuthConfig, AuthError, MemoryProfileSource, Permission, PermissionType, Session,
    SettingsBuilder, UserProfile,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn editor_profile() -> anyhow::Result<UserProfile> {
    let settings = SettingsBuilder::new("X")
        .organization("org-1", vec![])
        .project(
            "p1",
            vec![Permission::for_feeds(PermissionType::EditGtfs, ["f1"])],
            Vec::<String>::new(),
        )
        .build();
    Ok(UserProfile::new("editor").with_settings(&settings)?)
}

#[tokio::test]
async fn refresh_rebuilds_from_new_profile() -> anyhow::Result<()> {
    init_tracing();
    let source = MemoryProfileSource::new();
    source.insert("tok", editor_profile()?).await;
    let session = Session::new(source, AuthConfig::new("X"));

    let before = session.login("tok").await?;
    assert!(!before.permissions().is_project_admin("p1", Some("org-1")));

    // An administrator promotes the user out of band.
    let promoted = session
        .source()
        .get("editor")
        .await
        .expect("profile stored")
        .with_settings(&SettingsBuilder::new("X").organization_admin("org-1").build())?;
    session.source().replace(promoted).await;

    let after = session.refresh().await?;
    assert!(after.permissions().is_project_admin("p1", Some("org-1")));

    // The old snapshot is untouched.
    assert!(!before.permissions().is_project_admin("p1", Some("org-1")));
    assert!(Arc::ptr_eq(&after, &session.current().await));
    Ok(())
}

#[tokio::test]
async fn toggle_subscription_round_trips_through_source() -> anyhow::Result<()> {
    init_tracing();
    let source = MemoryProfileSource::new();
    source.insert("tok", editor_profile()?).await;
    let session = Session::new(source, AuthConfig::new("X"));
    session.login("tok").await?;

    let auth = session.toggle_subscription("feed-updated", "p1").await?;
    assert_eq!(
        auth.subscriptions().has_project_subscription("p1", "feed-updated"),
        Some(true)
    );

    let stored = session.source().get("editor").await.expect("profile stored");
    assert_eq!(
        stored.app_metadata.datatools[0]["subscriptions"][0]["target"][0],
        "p1"
    );

    // Permissions survive the edit.
    assert!(auth
        .permissions()
        .has_feed_permission(None, "p1", "f1", &PermissionType::EditGtfs)
        .is_some());

    let auth = session.toggle_subscription("feed-updated", "p1").await?;
    assert!(!auth.subscriptions().has_subscription("feed-updated"));
    Ok(())
}

#[tokio::test]
async fn toggle_requires_login() {
    let session = Session::new(MemoryProfileSource::new(), AuthConfig::new("X"));
    assert!(session
        .toggle_subscription("feed-updated", "p1")
        .await
        .is_err());
}

#[tokio::test]
async fn toggle_leaves_unreadable_settings_in_place() -> anyhow::Result<()> {
    init_tracing();
    let datatools = serde_json::json!([{
        "client_id": "X",
        "permissions": [{"type": "administer-application"}],
        "projects": [{"project_id": "p1", "permissions": "all"}]
    }]);
    let mut profile = UserProfile::new("admin");
    profile.app_metadata.datatools = datatools.clone();

    let source = MemoryProfileSource::new();
    source.insert("tok", profile).await;
    let session = Session::new(source, AuthConfig::new("X"));
    session.login("tok").await?;

    let result = session.toggle_subscription("feed-updated", "p1").await;
    assert!(matches!(result, Err(AuthError::Settings(_))));

    let stored = session.source().get("admin").await.expect("profile stored");
    assert_eq!(stored.app_metadata.datatools, datatools);
    Ok(())
}

#[tokio::test]
async fn degraded_profile_logs_in_without_privileges() -> anyhow::Result<()> {
    init_tracing();
    let mut profile = UserProfile::new("stranger");
    profile.app_metadata.datatools = serde_json::json!("not-a-list");

    let source = MemoryProfileSource::new();
    source.insert("tok", profile).await;
    let session = Session::new(source, AuthConfig::new("X"));

    let auth = session.login("tok").await?;
    assert!(!auth.is_public());
    assert!(!auth.degraded_reasons().is_empty());
    assert!(!auth.permissions().has_organization("org-1"));
    Ok(())
}

#[test]
fn profile_loads_from_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"{{"user_id": "u", "app_metadata": {{"datatools": [
            {{"client_id": "X", "permissions": [{{"type": "administer-application"}}]}}
        ]}}}}"#
    )?;

    let profile = UserProfile::load(file.path())?;
    let auth = datatools_auth::UserAuthorization::from_profile(&profile, &AuthConfig::new("X"));
    assert!(auth.permissions().is_application_admin());
    Ok(())
}

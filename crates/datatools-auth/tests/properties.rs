//! End-to-end authorization properties, checked from profile JSON.
//!
//! Every case starts from the raw `app_metadata.datatools` value the
//! identity provider returns, so these also pin the wire contract.

use datatools_auth::{
    AuthConfig, ClientId, DegradedReason, FeedGrant, FeedMatch, PermissionType, UserAuthorization,
    UserPermissions, UserProfile, UserSubscriptions,
};
use serde_json::{json, Value};

fn client() -> ClientId {
    ClientId::new("X")
}

fn permissions(datatools: Value) -> UserPermissions {
    UserPermissions::from_value(Some(&datatools), &client()).into_inner()
}

#[test]
fn fail_closed_for_absent_and_empty_metadata() {
    for built in [
        UserPermissions::from_value(None, &client()),
        UserPermissions::from_value(Some(&json!([])), &client()),
    ] {
        let perms = built.value();
        assert!(!perms.is_application_admin());
        assert!(!perms.has_organization("anything"));
        assert!(!perms.can_administer_an_organization());
        assert!(!perms.is_organization_admin(Some("anything")));
        assert!(!perms.has_project("anything", Some("anything")));
        assert!(!perms.is_project_admin("anything", Some("anything")));
        assert!(!perms.has_project_permission(None, "anything", &PermissionType::EditGtfs));
        assert_eq!(
            perms.has_feed_permission(None, "anything", "anything", &PermissionType::ManageFeed),
            None
        );
    }
}

#[test]
fn application_admin_overrides_every_scope() {
    let perms = permissions(json!([
        {"client_id": "X", "permissions": [{"type": "administer-application"}]}
    ]));

    assert!(perms.is_organization_admin(Some("any-org")));
    assert!(perms.is_project_admin("any-proj", None));
    assert_eq!(
        perms.has_feed_permission(None, "any-proj", "any-feed", &PermissionType::ManageFeed),
        Some(FeedGrant::Administrator)
    );
}

#[test]
fn wildcard_and_listed_feeds() {
    let perms = permissions(json!([{
        "client_id": "X",
        "projects": [
            {
                "project_id": "open",
                "permissions": [{"type": "edit-gtfs", "feeds": ["*"]}],
                "defaultFeeds": []
            },
            {
                "project_id": "narrow",
                "permissions": [{"type": "edit-gtfs", "feeds": ["feed-A"]}],
                "defaultFeeds": []
            }
        ]
    }]));

    let edit = PermissionType::EditGtfs;
    assert!(perms
        .has_feed_permission(None, "open", "arbitrary-feed-id", &edit)
        .is_some());
    assert_eq!(
        perms.has_feed_permission(None, "narrow", "feed-A", &edit),
        Some(FeedGrant::PermissionFeeds(FeedMatch::Exact))
    );
    assert_eq!(perms.has_feed_permission(None, "narrow", "feed-B", &edit), None);
}

#[test]
fn default_feeds_apply_to_any_held_permission() {
    let perms = permissions(json!([{
        "client_id": "X",
        "projects": [{
            "project_id": "p",
            "permissions": [{"type": "approve-alert", "feeds": ["feed-Z"]}],
            "defaultFeeds": ["feed-X"]
        }]
    }]));

    assert_eq!(
        perms.has_feed_permission(None, "p", "feed-X", &PermissionType::ApproveAlert),
        Some(FeedGrant::DefaultFeed(FeedMatch::Exact))
    );
}

#[test]
fn only_the_configured_client_is_visible() {
    let datatools = json!([
        {"client_id": "other", "permissions": [{"type": "administer-application"}],
         "projects": [{"project_id": "secret", "permissions": [], "defaultFeeds": []}],
         "subscriptions": [{"type": "feed-updated", "target": ["secret"]}]},
        {"client_id": "X", "permissions": [], "organizations": [], "projects": []}
    ]);

    let perms = permissions(datatools.clone());
    assert!(!perms.is_application_admin());
    assert!(!perms.has_project("secret", None));
    assert_eq!(perms.application_permissions().count(), 0);

    let subs = UserSubscriptions::from_value(Some(&datatools), &client()).into_inner();
    assert!(!subs.has_subscription("feed-updated"));
}

#[test]
fn app_level_administer_project_is_not_project_admin() {
    let perms = permissions(json!([{
        "client_id": "X",
        "permissions": [{"type": "administer-project"}],
        "projects": [{
            "project_id": "p1",
            "permissions": [{"type": "manage-feed"}],
            "defaultFeeds": ["f1"]
        }],
        "organizations": []
    }]));

    let manage = PermissionType::ManageFeed;
    assert!(!perms.is_project_admin("p1", None));
    assert!(perms.has_project("p1", None));
    assert!(perms.has_feed_permission(None, "p1", "f1", &manage).is_some());
    assert_eq!(perms.has_feed_permission(None, "p1", "f2", &manage), None);
}

#[test]
fn subscription_targets() {
    let subs = UserSubscriptions::from_value(
        Some(&json!([{
            "client_id": "X",
            "subscriptions": [{"type": "feed-updated", "target": ["proj-1"]}]
        }])),
        &client(),
    )
    .into_inner();

    assert_eq!(subs.has_project_subscription("proj-1", "feed-updated"), Some(true));
    assert_eq!(subs.has_project_subscription("proj-2", "feed-updated"), Some(false));
    assert_eq!(
        subs.has_feed_subscription("proj-2", "feed-9", "feed-updated"),
        Some(false)
    );
    // Never-subscribed types count as not subscribed.
    assert!(!subs.has_subscription("nonexistent-type"));
}

#[test]
fn malformed_profile_is_reported_not_raised() -> anyhow::Result<()> {
    let profile = UserProfile::from_json(
        r#"{"user_id": "u", "app_metadata": {"datatools": {"client_id": "X", "permissions": 5}}}"#,
    )?;

    let auth = UserAuthorization::from_profile(&profile, &AuthConfig::new("X"));
    assert!(!auth.permissions().is_application_admin());
    assert_eq!(auth.degraded_reasons()[0], DegradedReason::NotAList("object"));
    assert!(matches!(
        auth.degraded_reasons()[1],
        DegradedReason::MalformedSettings(_)
    ));
    Ok(())
}

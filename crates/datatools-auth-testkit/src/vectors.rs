//! Golden authorization scenarios.
//!
//! Each scenario is a raw `app_metadata.datatools` document plus the
//! answers every implementation of the permission model must give for it.
//! They cover the admin overrides, feed matching, and client selection.

use datatools_auth_core::{ClientId, PermissionType};
use datatools_auth_perms::{UserPermissions, UserSubscriptions};
use serde_json::Value;

/// Client id every scenario is evaluated with.
pub const SCENARIO_CLIENT_ID: &str = "datatools-console";

/// One expected answer.
#[derive(Debug, Clone)]
pub enum Check {
    ApplicationAdmin(bool),
    OrganizationAdmin {
        organization: Option<&'static str>,
        expected: bool,
    },
    HasProject {
        project: &'static str,
        organization: Option<&'static str>,
        expected: bool,
    },
    ProjectAdmin {
        project: &'static str,
        organization: Option<&'static str>,
        expected: bool,
    },
    /// `granted` is whether `has_feed_permission` returns a grant.
    FeedPermission {
        project: &'static str,
        feed: &'static str,
        permission: &'static str,
        granted: bool,
    },
    ProjectSubscription {
        project: &'static str,
        subscription: &'static str,
        expected: Option<bool>,
    },
    FeedSubscription {
        project: &'static str,
        feed: &'static str,
        subscription: &'static str,
        expected: Option<bool>,
    },
}

/// A golden scenario.
#[derive(Debug, Clone)]
pub struct GoldenScenario {
    /// Human-readable name for the scenario.
    pub name: &'static str,
    /// The `app_metadata.datatools` JSON.
    pub datatools: &'static str,
    /// Expected answers.
    pub checks: Vec<Check>,
}

/// Get all golden scenarios.
pub fn all_scenarios() -> Vec<GoldenScenario> {
    vec![
        GoldenScenario {
            name: "absent metadata grants nothing",
            datatools: "null",
            checks: vec![
                Check::ApplicationAdmin(false),
                Check::OrganizationAdmin {
                    organization: Some("org"),
                    expected: false,
                },
                Check::HasProject {
                    project: "p",
                    organization: None,
                    expected: false,
                },
                Check::FeedPermission {
                    project: "p",
                    feed: "f",
                    permission: "view-feed",
                    granted: false,
                },
                Check::ProjectSubscription {
                    project: "p",
                    subscription: "feed-updated",
                    expected: None,
                },
            ],
        },
        GoldenScenario {
            name: "application admin",
            datatools: r#"[{"client_id": "datatools-console",
                "permissions": [{"type": "administer-application"}]}]"#,
            checks: vec![
                Check::ApplicationAdmin(true),
                Check::OrganizationAdmin {
                    organization: Some("any-org"),
                    expected: true,
                },
                Check::ProjectAdmin {
                    project: "any-proj",
                    organization: None,
                    expected: true,
                },
                Check::FeedPermission {
                    project: "any-proj",
                    feed: "any-feed",
                    permission: "manage-feed",
                    granted: true,
                },
            ],
        },
        GoldenScenario {
            name: "organization admin",
            datatools: r#"[{"client_id": "datatools-console",
                "organizations": [{"organization_id": "org-1",
                    "permissions": [{"type": "administer-organization"}]}]}]"#,
            checks: vec![
                Check::ApplicationAdmin(false),
                Check::OrganizationAdmin {
                    organization: Some("org-1"),
                    expected: true,
                },
                Check::OrganizationAdmin {
                    organization: Some("org-2"),
                    expected: false,
                },
                Check::OrganizationAdmin {
                    organization: None,
                    expected: false,
                },
                Check::HasProject {
                    project: "p9",
                    organization: Some("org-1"),
                    expected: true,
                },
                Check::ProjectAdmin {
                    project: "p9",
                    organization: Some("org-1"),
                    expected: true,
                },
                Check::ProjectAdmin {
                    project: "p9",
                    organization: None,
                    expected: false,
                },
            ],
        },
        GoldenScenario {
            name: "wildcard and listed feeds",
            datatools: r#"[{"client_id": "datatools-console",
                "projects": [
                    {"project_id": "open",
                     "permissions": [{"type": "edit-gtfs", "feeds": ["*"]}],
                     "defaultFeeds": []},
                    {"project_id": "narrow",
                     "permissions": [{"type": "edit-gtfs", "feeds": ["feed-A"]}],
                     "defaultFeeds": []}
                ]}]"#,
            checks: vec![
                Check::FeedPermission {
                    project: "open",
                    feed: "arbitrary-feed-id",
                    permission: "edit-gtfs",
                    granted: true,
                },
                Check::FeedPermission {
                    project: "narrow",
                    feed: "feed-A",
                    permission: "edit-gtfs",
                    granted: true,
                },
                Check::FeedPermission {
                    project: "narrow",
                    feed: "feed-B",
                    permission: "edit-gtfs",
                    granted: false,
                },
                Check::FeedPermission {
                    project: "open",
                    feed: "feed-A",
                    permission: "approve-gtfs",
                    granted: false,
                },
            ],
        },
        GoldenScenario {
            name: "app-level administer-project with default feeds",
            datatools: r#"[{"client_id": "datatools-console",
                "permissions": [{"type": "administer-project"}],
                "projects": [{"project_id": "p1",
                    "permissions": [{"type": "manage-feed"}], "defaultFeeds": ["f1"]}],
                "organizations": []}]"#,
            checks: vec![
                Check::ProjectAdmin {
                    project: "p1",
                    organization: None,
                    expected: false,
                },
                Check::HasProject {
                    project: "p1",
                    organization: None,
                    expected: true,
                },
                Check::FeedPermission {
                    project: "p1",
                    feed: "f1",
                    permission: "manage-feed",
                    granted: true,
                },
                Check::FeedPermission {
                    project: "p1",
                    feed: "f2",
                    permission: "manage-feed",
                    granted: false,
                },
            ],
        },
        GoldenScenario {
            name: "foreign client blob is invisible",
            datatools: r#"[
                {"client_id": "another-app", "permissions": [{"type": "administer-application"}],
                 "subscriptions": [{"type": "feed-updated", "target": ["p1"]}]},
                {"client_id": "datatools-console", "projects": [{"project_id": "p1"}]}
            ]"#,
            checks: vec![
                Check::ApplicationAdmin(false),
                Check::HasProject {
                    project: "p1",
                    organization: None,
                    expected: true,
                },
                Check::ProjectSubscription {
                    project: "p1",
                    subscription: "feed-updated",
                    expected: None,
                },
            ],
        },
        GoldenScenario {
            name: "subscription targets",
            datatools: r#"[{"client_id": "datatools-console",
                "subscriptions": [{"type": "feed-updated", "target": ["proj-1", "feed-7"]}]}]"#,
            checks: vec![
                Check::ProjectSubscription {
                    project: "proj-1",
                    subscription: "feed-updated",
                    expected: Some(true),
                },
                Check::ProjectSubscription {
                    project: "proj-2",
                    subscription: "feed-updated",
                    expected: Some(false),
                },
                Check::FeedSubscription {
                    project: "proj-2",
                    feed: "feed-9",
                    subscription: "feed-updated",
                    expected: Some(false),
                },
                Check::FeedSubscription {
                    project: "proj-2",
                    feed: "feed-7",
                    subscription: "feed-updated",
                    expected: Some(true),
                },
                Check::FeedSubscription {
                    project: "proj-1",
                    feed: "feed-9",
                    subscription: "project-updated",
                    expected: None,
                },
            ],
        },
    ]
}

/// Evaluate one check against built lookups.
pub fn evaluate(check: &Check, perms: &UserPermissions, subs: &UserSubscriptions) -> bool {
    match *check {
        Check::ApplicationAdmin(expected) => perms.is_application_admin() == expected,
        Check::OrganizationAdmin { organization, expected } => {
            perms.is_organization_admin(organization) == expected
        }
        Check::HasProject { project, organization, expected } => {
            perms.has_project(project, organization) == expected
        }
        Check::ProjectAdmin { project, organization, expected } => {
            perms.is_project_admin(project, organization) == expected
        }
        Check::FeedPermission { project, feed, permission, granted } => {
            perms
                .has_feed_permission(None, project, feed, &PermissionType::from(permission))
                .is_some()
                == granted
        }
        Check::ProjectSubscription { project, subscription, expected } => {
            subs.has_project_subscription(project, subscription) == expected
        }
        Check::FeedSubscription { project, feed, subscription, expected } => {
            subs.has_feed_subscription(project, feed, subscription) == expected
        }
    }
}

/// Verify every check of every scenario.
///
/// Returns `(scenario name, check, passed)` for each check. A scenario whose
/// JSON does not parse reports a single failed entry.
pub fn verify_all_scenarios() -> Vec<(String, String, bool)> {
    let client_id = ClientId::new(SCENARIO_CLIENT_ID);
    let mut results = Vec::new();

    for scenario in all_scenarios() {
        let datatools: Value = match serde_json::from_str(scenario.datatools) {
            Ok(v) => v,
            Err(e) => {
                results.push((scenario.name.to_string(), format!("parse: {e}"), false));
                continue;
            }
        };

        let perms = UserPermissions::from_value(Some(&datatools), &client_id).into_inner();
        let subs = UserSubscriptions::from_value(Some(&datatools), &client_id).into_inner();

        for check in &scenario.checks {
            results.push((
                scenario.name.to_string(),
                format!("{check:?}"),
                evaluate(check, &perms, &subs),
            ));
        }
    }

    results
}

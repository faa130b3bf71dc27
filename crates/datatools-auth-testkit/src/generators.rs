//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::Value;

use datatools_auth_core::{
    DatatoolsSettings, OrganizationScope, Permission, PermissionType, ProjectScope, Subscription,
    FEED_WILDCARD,
};

/// Generate a permission type, mostly known literals.
pub fn permission_type() -> impl Strategy<Value = PermissionType> {
    prop_oneof![
        Just(PermissionType::AdministerApplication),
        Just(PermissionType::AdministerOrganization),
        Just(PermissionType::AdministerProject),
        Just(PermissionType::ManageFeed),
        Just(PermissionType::ViewFeed),
        Just(PermissionType::EditGtfs),
        Just(PermissionType::ApproveGtfs),
        Just(PermissionType::EditAlert),
        Just(PermissionType::ApproveAlert),
        "x-[a-z]{1,8}".prop_map(PermissionType::from),
    ]
}

/// Generate a permission type that is not an administrator type.
pub fn plain_permission_type() -> impl Strategy<Value = PermissionType> {
    permission_type().prop_filter("not an admin type", |t| !t.is_admin())
}

/// Generate an id from a small alphabet so collisions happen.
pub fn small_id(prefix: &'static str) -> impl Strategy<Value = String> {
    (0u8..6).prop_map(move |n| format!("{prefix}-{n}"))
}

/// Generate a feed list, sometimes with the wildcard.
pub fn feed_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![4 => small_id("feed"), 1 => Just(FEED_WILDCARD.to_string())],
        0..4,
    )
}

/// Generate a permission.
pub fn permission() -> impl Strategy<Value = Permission> {
    (permission_type(), prop::option::of(feed_list())).prop_map(|(t, feeds)| Permission {
        feeds,
        ..Permission::new(t)
    })
}

/// Generate a project scope.
pub fn project() -> impl Strategy<Value = ProjectScope> {
    (
        small_id("project"),
        prop::collection::vec(permission(), 0..4),
        feed_list(),
    )
        .prop_map(|(project_id, permissions, default_feeds)| ProjectScope {
            project_id,
            permissions,
            default_feeds,
        })
}

/// Generate an organization scope.
pub fn organization() -> impl Strategy<Value = OrganizationScope> {
    (small_id("org"), prop::collection::vec(permission(), 0..3)).prop_map(
        |(organization_id, permissions)| OrganizationScope {
            organization_id,
            permissions,
        },
    )
}

/// Generate a subscription.
pub fn subscription() -> impl Strategy<Value = Subscription> {
    (
        prop_oneof![Just("feed-updated"), Just("project-updated"), Just("deployment-updated")],
        prop::collection::vec(prop_oneof![small_id("project"), small_id("feed")], 0..4),
    )
        .prop_map(|(t, target)| Subscription {
            subscription_type: t.to_string(),
            target,
        })
}

/// Generate an arbitrary JSON value, nested a few levels deep.
pub fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z*-]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(
                prop_oneof![
                    Just("client_id".to_string()),
                    Just("permissions".to_string()),
                    Just("projects".to_string()),
                    Just("type".to_string()),
                    "[a-z]{1,6}",
                ],
                inner,
                0..4,
            )
            .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Parameters for generating a settings blob.
#[derive(Debug, Clone)]
pub struct SettingsParams {
    pub client_id: String,
    pub permissions: Vec<Permission>,
    pub organizations: Vec<OrganizationScope>,
    pub projects: Vec<ProjectScope>,
    pub subscriptions: Vec<Subscription>,
}

impl Arbitrary for SettingsParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            prop_oneof![Just("client-a".to_string()), Just("client-b".to_string())],
            prop::collection::vec(permission(), 0..3),
            prop::collection::vec(organization(), 0..3),
            prop::collection::vec(project(), 0..5),
            prop::collection::vec(subscription(), 0..3),
        )
            .prop_map(
                |(client_id, permissions, organizations, projects, subscriptions)| SettingsParams {
                    client_id,
                    permissions,
                    organizations,
                    projects,
                    subscriptions,
                },
            )
            .boxed()
    }
}

/// Generate a settings blob from parameters.
pub fn settings_from_params(params: &SettingsParams) -> DatatoolsSettings {
    DatatoolsSettings {
        client_id: Some(params.client_id.as_str().into()),
        permissions: params.permissions.clone(),
        organizations: params.organizations.clone(),
        projects: params.projects.clone(),
        subscriptions: params.subscriptions.clone(),
    }
}

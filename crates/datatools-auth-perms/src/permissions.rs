//! User permission lookups.
//!
//! A [`UserPermissions`] is built once from the datatools settings in a
//! user profile and then queried by every UI gate and route guard. Access
//! is layered: application admin implies organization admin, which implies
//! project admin, which implies every project and feed permission.

use std::collections::HashMap;

use datatools_auth_core::{
    find_client_settings, json_kind, ClientId, DatatoolsSettings, OrganizationScope, Permission,
    PermissionType, ProjectScope, FEED_WILDCARD,
};
use serde_json::Value;

use crate::construction::Construction;
use crate::error::DegradedReason;

/// How a feed id matched a feed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMatch {
    /// The list contains `"*"`.
    Wildcard,
    /// The list names the feed.
    Exact,
}

/// Why a feed permission check succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedGrant {
    /// The user administers the project (or something above it).
    Administrator,
    /// The feed is one of the project's default feeds.
    DefaultFeed(FeedMatch),
    /// The feed is listed on the permission itself.
    PermissionFeeds(FeedMatch),
}

/// Permission lookups for a single user.
///
/// Never mutated after construction. Every query is pure and answers
/// `false`, `None` or an empty slice for scopes the user does not hold.
#[derive(Debug, Clone, Default)]
pub struct UserPermissions {
    /// Application-level permissions by type.
    app_permissions: HashMap<PermissionType, Permission>,

    /// Permissions of every held organization, flattened by type.
    org_permissions: HashMap<PermissionType, Permission>,

    /// Held organizations by id.
    organizations: HashMap<String, OrganizationScope>,

    /// Held projects by id.
    projects: HashMap<String, ProjectScope>,

    /// Id of the first organization in profile order.
    first_organization: Option<String>,
}

impl UserPermissions {
    /// Permissions of an anonymous user: nothing is granted.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from typed settings, selecting the blob for `client_id`.
    ///
    /// Absent settings give a clean empty value. A list without a blob for
    /// `client_id` gives a degraded empty value.
    pub fn from_settings(
        settings: Option<&[DatatoolsSettings]>,
        client_id: &ClientId,
    ) -> Construction<Self> {
        let Some(items) = settings else {
            return Construction::Clean(Self::empty());
        };

        match items.iter().find(|s| s.is_for(client_id)) {
            Some(selected) => Construction::Clean(Self::from_client_settings(selected)),
            None => degraded(DegradedReason::NoMatchingClient(client_id.clone())),
        }
    }

    /// Build from the raw `app_metadata.datatools` value of a profile.
    ///
    /// Only the element whose `client_id` matches is decoded, so malformed
    /// blobs belonging to other clients are ignored.
    pub fn from_value(datatools: Option<&Value>, client_id: &ClientId) -> Construction<Self> {
        let items = match datatools {
            None | Some(Value::Null) => return Construction::Clean(Self::empty()),
            Some(Value::Array(items)) => items,
            Some(other) => return degraded(DegradedReason::NotAList(json_kind(other))),
        };

        let Some(selected) = find_client_settings(items, client_id) else {
            return degraded(DegradedReason::NoMatchingClient(client_id.clone()));
        };

        match DatatoolsSettings::from_value(selected) {
            Ok(settings) => Construction::Clean(Self::from_client_settings(&settings)),
            Err(e) => degraded(DegradedReason::MalformedSettings(e.to_string())),
        }
    }

    /// Build from an already selected settings blob.
    pub fn from_client_settings(settings: &DatatoolsSettings) -> Self {
        let app_permissions: HashMap<_, _> = settings
            .permissions
            .iter()
            .map(|p| (p.permission_type.clone(), p.clone()))
            .collect();

        // Assumes one organization per user; overlapping types are last-write-wins.
        let org_permissions: HashMap<_, _> = settings
            .organizations
            .iter()
            .filter(|o| !o.organization_id.is_empty())
            .flat_map(|o| o.permissions.iter())
            .map(|p| (p.permission_type.clone(), p.clone()))
            .collect();

        let organizations: HashMap<_, _> = settings
            .organizations
            .iter()
            .filter(|o| !o.organization_id.is_empty())
            .map(|o| (o.organization_id.clone(), o.clone()))
            .collect();

        let projects: HashMap<_, _> = settings
            .projects
            .iter()
            .filter(|p| !p.project_id.is_empty())
            .map(|p| (p.project_id.clone(), p.clone()))
            .collect();

        tracing::debug!(
            app_permissions = app_permissions.len(),
            organizations = organizations.len(),
            projects = projects.len(),
            "built user permissions"
        );

        Self {
            app_permissions,
            org_permissions,
            organizations,
            projects,
            first_organization: settings
                .organizations
                .iter()
                .find(|o| !o.organization_id.is_empty())
                .map(|o| o.organization_id.clone()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Application
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether the user administers the whole application.
    pub fn is_application_admin(&self) -> bool {
        self.app_permissions
            .contains_key(&PermissionType::AdministerApplication)
    }

    /// Get an application-level permission by type.
    pub fn get_application_permission(
        &self,
        permission_type: &PermissionType,
    ) -> Option<&Permission> {
        self.app_permissions.get(permission_type)
    }

    /// All application-level permissions, in no particular order.
    pub fn application_permissions(&self) -> impl Iterator<Item = &Permission> {
        self.app_permissions.values()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Organizations
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether the user belongs to `organization_id`.
    pub fn has_organization(&self, organization_id: &str) -> bool {
        self.is_application_admin() || self.organizations.contains_key(organization_id)
    }

    /// The user's organization.
    ///
    /// Users are expected to belong to at most one organization; with more,
    /// the first one in the profile is returned.
    pub fn get_organization_id(&self) -> Option<&str> {
        self.first_organization.as_deref()
    }

    /// Whether the user administers any organization at all.
    pub fn can_administer_an_organization(&self) -> bool {
        self.is_application_admin()
            || self
                .org_permissions
                .contains_key(&PermissionType::AdministerOrganization)
    }

    /// Whether the user administers `organization_id`.
    pub fn is_organization_admin(&self, organization_id: Option<&str>) -> bool {
        if self.is_application_admin() {
            return true;
        }
        match organization_id {
            Some(id) => {
                self.has_organization(id)
                    && self
                        .get_organization_permission(id, &PermissionType::AdministerOrganization)
                        .is_some()
            }
            None => false,
        }
    }

    /// Permissions granted within a held organization.
    pub fn get_organization_permissions(&self, organization_id: &str) -> &[Permission] {
        self.organizations
            .get(organization_id)
            .map(|o| o.permissions.as_slice())
            .unwrap_or_default()
    }

    /// A permission of the given type within a held organization.
    pub fn get_organization_permission(
        &self,
        organization_id: &str,
        permission_type: &PermissionType,
    ) -> Option<&Permission> {
        self.organizations
            .get(organization_id)
            .and_then(|o| o.permission(permission_type))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Projects
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether the user can see `project_id`.
    pub fn has_project(&self, project_id: &str, organization_id: Option<&str>) -> bool {
        self.is_organization_admin(organization_id) || self.projects.contains_key(project_id)
    }

    /// Whether the user administers `project_id`.
    pub fn is_project_admin(&self, project_id: &str, organization_id: Option<&str>) -> bool {
        if self.is_application_admin() || self.is_organization_admin(organization_id) {
            return true;
        }
        self.has_project(project_id, organization_id)
            && self
                .get_project_permission(project_id, &PermissionType::AdministerProject)
                .is_some()
    }

    /// Permissions granted within a held project.
    pub fn get_project_permissions(&self, project_id: &str) -> &[Permission] {
        self.projects
            .get(project_id)
            .map(|p| p.permissions.as_slice())
            .unwrap_or_default()
    }

    /// A permission of the given type within a held project.
    pub fn get_project_permission(
        &self,
        project_id: &str,
        permission_type: &PermissionType,
    ) -> Option<&Permission> {
        self.projects
            .get(project_id)
            .and_then(|p| p.permission(permission_type))
    }

    /// Default feeds of a held project.
    pub fn get_project_default_feeds(&self, project_id: &str) -> &[String] {
        self.projects
            .get(project_id)
            .map(|p| p.default_feeds.as_slice())
            .unwrap_or_default()
    }

    /// Whether the user holds `permission_type` on `project_id`.
    pub fn has_project_permission(
        &self,
        organization_id: Option<&str>,
        project_id: &str,
        permission_type: &PermissionType,
    ) -> bool {
        self.is_project_admin(project_id, organization_id)
            || self
                .get_project_permission(project_id, permission_type)
                .is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Feeds
    // ─────────────────────────────────────────────────────────────────────────

    /// Match `feed_id` against a feed list.
    ///
    /// `None` means the list does not cover the feed. It is not an explicit
    /// denial; nothing in the model denies explicitly.
    pub fn has_feed(feed_list: &[String], feed_id: &str) -> Option<FeedMatch> {
        if feed_list.iter().any(|f| f == FEED_WILDCARD) {
            Some(FeedMatch::Wildcard)
        } else if feed_list.iter().any(|f| f == feed_id) {
            Some(FeedMatch::Exact)
        } else {
            None
        }
    }

    /// Whether the user holds `permission_type` on a feed of a project.
    ///
    /// Holding the permission in the project covers the project's default
    /// feeds plus the feeds listed on the permission.
    pub fn has_feed_permission(
        &self,
        organization_id: Option<&str>,
        project_id: &str,
        feed_id: &str,
        permission_type: &PermissionType,
    ) -> Option<FeedGrant> {
        if self.is_project_admin(project_id, organization_id) {
            return Some(FeedGrant::Administrator);
        }

        let permission = self.get_project_permission(project_id, permission_type)?;
        Self::has_feed(self.get_project_default_feeds(project_id), feed_id)
            .map(FeedGrant::DefaultFeed)
            .or_else(|| Self::has_feed(permission.feeds(), feed_id).map(FeedGrant::PermissionFeeds))
    }
}

fn degraded(reason: DegradedReason) -> Construction<UserPermissions> {
    tracing::warn!(%reason, "user permissions built empty");
    Construction::degraded(UserPermissions::empty(), reason)
}

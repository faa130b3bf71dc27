//! Fluent construction of settings blobs.

use crate::settings::{DatatoolsSettings, OrganizationScope, Permission, ProjectScope, Subscription};
use crate::types::{ClientId, PermissionType};

/// Builder for a [`DatatoolsSettings`] blob.
///
/// Used by the admin console when assigning permissions to a user, and by
/// tests to describe profiles without writing JSON.
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    settings: DatatoolsSettings,
}

impl SettingsBuilder {
    /// Start a blob for the given client.
    pub fn new(client_id: impl Into<ClientId>) -> Self {
        Self {
            settings: DatatoolsSettings::for_client(client_id.into()),
        }
    }

    /// Grant an application-level permission.
    pub fn app_permission(mut self, permission: Permission) -> Self {
        self.settings.permissions.push(permission);
        self
    }

    /// Make the user an application administrator.
    pub fn application_admin(self) -> Self {
        self.app_permission(Permission::new(PermissionType::AdministerApplication))
    }

    /// Add an organization with the given permissions.
    pub fn organization(
        mut self,
        organization_id: impl Into<String>,
        permissions: Vec<Permission>,
    ) -> Self {
        self.settings.organizations.push(OrganizationScope {
            organization_id: organization_id.into(),
            permissions,
        });
        self
    }

    /// Add an organization the user administers.
    pub fn organization_admin(self, organization_id: impl Into<String>) -> Self {
        self.organization(
            organization_id,
            vec![Permission::new(PermissionType::AdministerOrganization)],
        )
    }

    /// Add a project with permissions and default feeds.
    pub fn project<I, S>(
        mut self,
        project_id: impl Into<String>,
        permissions: Vec<Permission>,
        default_feeds: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.projects.push(ProjectScope {
            project_id: project_id.into(),
            permissions,
            default_feeds: default_feeds.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Add a project the user administers.
    pub fn project_admin(self, project_id: impl Into<String>) -> Self {
        self.project(
            project_id,
            vec![Permission::new(PermissionType::AdministerProject)],
            Vec::<String>::new(),
        )
    }

    /// Subscribe to `subscription_type` for the given targets.
    pub fn subscription<I, S>(mut self, subscription_type: impl Into<String>, target: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.subscriptions.push(Subscription {
            subscription_type: subscription_type.into(),
            target: target.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Finish the blob.
    pub fn build(self) -> DatatoolsSettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_shape() {
        let settings = SettingsBuilder::new("X")
            .application_admin()
            .organization_admin("org-1")
            .project(
                "p1",
                vec![Permission::for_feeds(PermissionType::ManageFeed, ["f1"])],
                ["f2"],
            )
            .subscription("feed-updated", ["p1"])
            .build();

        assert!(settings.is_for(&ClientId::new("X")));
        assert_eq!(settings.permissions.len(), 1);
        assert_eq!(settings.organizations[0].organization_id, "org-1");
        assert_eq!(settings.projects[0].default_feeds, vec!["f2"]);
        assert_eq!(settings.projects[0].permissions[0].feeds(), ["f1".to_string()]);
        assert!(settings.subscriptions[0].targets("p1"));
    }

    #[test]
    fn test_builder_output_decodes_back() {
        let settings = SettingsBuilder::new("X").project_admin("p1").build();
        let json = settings.to_json().unwrap();
        assert_eq!(DatatoolsSettings::from_json(&json).unwrap(), settings);
    }
}

//! # Datatools Auth Permissions
//!
//! Per-user permission and subscription lookups.
//!
//! ## Overview
//!
//! A user profile carries a list of settings blobs, one per client
//! application. The blob matching the configured client id is folded once
//! into immutable lookup maps, which the console then queries synchronously.
//!
//! ## Access Levels
//!
//! - **Application admin** (`administer-application`): everything
//! - **Organization admin** (`administer-organization`): every project of that organization
//! - **Project admin** (`administer-project`): every permission and feed of that project
//! - **Project permission**: one capability, covering the project's default feeds
//!   and the feeds listed on the permission (`"*"` for all)
//!
//! ## Failure Model
//!
//! Construction never fails. A malformed profile yields an empty lookup
//! wrapped in [`Construction::Degraded`] together with the reason, so callers
//! fail closed and can still tell what went wrong.
//!
//! ## Usage
//!
//! ```rust
//! use datatools_auth_core::{ClientId, Permission, PermissionType, SettingsBuilder};
//! use datatools_auth_perms::UserPermissions;
//!
//! let client = ClientId::new("my-client");
//! let settings = vec![SettingsBuilder::new("my-client")
//!     .project("p1", vec![Permission::new(PermissionType::ManageFeed)], ["f1"])
//!     .build()];
//!
//! let perms = UserPermissions::from_settings(Some(settings.as_slice()), &client).into_inner();
//! assert!(perms.has_project("p1", None));
//! assert!(perms
//!     .has_feed_permission(None, "p1", "f1", &PermissionType::ManageFeed)
//!     .is_some());
//! ```

pub mod construction;
pub mod error;
pub mod permissions;
pub mod subscriptions;

pub use construction::Construction;
pub use error::DegradedReason;
pub use permissions::{FeedGrant, FeedMatch, UserPermissions};
pub use subscriptions::{SettingsInput, UserSubscriptions};

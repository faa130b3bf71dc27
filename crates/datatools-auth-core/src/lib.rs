//! # Datatools Auth Core
//!
//! Wire types for the per-client settings blob that a user profile carries
//! in `app_metadata.datatools`.
//!
//! This crate contains no authorization logic and no I/O. It defines the
//! JSON shape shared with the identity provider and a few pure editing
//! helpers used by the admin console.
//!
//! ## Key Types
//!
//! - [`DatatoolsSettings`] - One client's permissions, organizations, projects and subscriptions
//! - [`Permission`] - A granted capability, optionally limited to feeds (`"*"` for all)
//! - [`PermissionType`] - The permission `type` literals
//! - [`ClientId`] - Selects which blob in a profile applies
//!
//! ## Example
//!
//! ```rust
//! use datatools_auth_core::{Permission, PermissionType, SettingsBuilder};
//!
//! let settings = SettingsBuilder::new("my-client")
//!     .project("p1", vec![Permission::all_feeds(PermissionType::EditGtfs)], ["f1"])
//!     .subscription("feed-updated", ["p1"])
//!     .build();
//!
//! let json = settings.to_json().unwrap();
//! assert!(json.contains("\"defaultFeeds\":[\"f1\"]"));
//! ```

pub mod builder;
pub mod error;
pub mod settings;
pub mod types;

pub use builder::SettingsBuilder;
pub use error::{json_kind, Result, SettingsError};
pub use settings::{
    find_client_settings, merge_into_datatools, DatatoolsSettings, OrganizationScope, Permission,
    ProjectScope, Subscription,
};
pub use types::{ClientId, PermissionType, FEED_WILDCARD};

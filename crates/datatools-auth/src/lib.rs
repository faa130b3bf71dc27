//! # Datatools Auth
//!
//! The unified API for authorizing Datatools console users.
//!
//! ## Overview
//!
//! A user profile from the identity provider carries per-client settings in
//! `app_metadata.datatools`. This crate turns a profile into a
//! [`UserAuthorization`] (permission and subscription lookups) and keeps the
//! current one up to date across login, refresh and logout.
//!
//! ## Key Concepts
//!
//! - **Client id**: selects which settings blob in a profile applies. Passed in
//!   through [`AuthConfig`], never read from a global.
//! - **Fail closed**: a malformed profile gives a user with no privileges; the
//!   reason is kept in [`UserAuthorization::degraded_reasons`].
//! - **Rebuild, don't mutate**: every profile change builds a new authorization.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use datatools_auth::{AuthConfig, MemoryProfileSource, Session};
//!
//! async fn example() {
//!     let config = AuthConfig::from_env().unwrap();
//!     let session = Session::new(MemoryProfileSource::new(), config);
//!
//!     let auth = session.login("access-token").await.unwrap();
//!     if auth.permissions().is_project_admin("project-1", None) {
//!         // show project settings
//!     }
//!
//!     session.logout().await;
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `datatools_auth::core` - Settings wire types
//! - `datatools_auth::perms` - Permission and subscription lookups

pub mod config;
pub mod error;
pub mod profile;
pub mod session;
pub mod source;

// Re-export component crates
pub use datatools_auth_core as core;
pub use datatools_auth_perms as perms;

pub use config::{AuthConfig, CLIENT_ID_ENV};
pub use error::{AuthError, ConfigError, Result};
pub use profile::{AppMetadata, UserAuthorization, UserProfile};
pub use session::Session;
pub use source::{MemoryProfileSource, ProfileSource};

// Re-export commonly used types
pub use datatools_auth_core::{
    ClientId, DatatoolsSettings, Permission, PermissionType, SettingsBuilder,
};
pub use datatools_auth_perms::{
    Construction, DegradedReason, FeedGrant, FeedMatch, UserPermissions, UserSubscriptions,
};

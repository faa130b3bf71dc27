//! # Datatools Auth Testkit
//!
//! Testing utilities for Datatools auth.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden scenarios**: Raw profile metadata with the answers every query must give
//! - **Generators**: Proptest strategies for settings blobs and arbitrary JSON
//! - **Fixtures**: Helper structs for setting up users and sessions
//!
//! ## Golden Scenarios
//!
//! ```rust
//! use datatools_auth_testkit::vectors::verify_all_scenarios;
//!
//! for (scenario, check, passed) in verify_all_scenarios() {
//!     assert!(passed, "{scenario}: {check}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use datatools_auth_testkit::generators::{settings_from_params, SettingsParams};
//!
//! proptest! {
//!     #[test]
//!     fn building_is_deterministic(params: SettingsParams) {
//!         let settings = settings_from_params(&params);
//!         let a = UserPermissions::from_client_settings(&settings);
//!         let b = UserPermissions::from_client_settings(&settings);
//!         prop_assert_eq!(a.get_organization_id(), b.get_organization_id());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use datatools_auth_testkit::fixtures::ProfileFixture;
//!
//! let fixture = ProfileFixture::gtfs_editor("editor", "project-1", &["feed-1"]);
//! let auth = fixture.authorization();
//! assert!(auth.permissions().has_project("project-1", None));
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_user_fixtures, ProfileFixture};
pub use generators::{settings_from_params, SettingsParams};
pub use vectors::{all_scenarios, verify_all_scenarios, Check, GoldenScenario};

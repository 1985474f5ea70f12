//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireStaff`] -- Any staff role.
//! - [`rbac::RequireManagement`] -- GM or Manager.
//! - [`rbac::RequireAssigner`] -- Superadmin, GM or Manager.
//! - [`rbac::RequireGm`] -- GM only.

pub mod auth;
pub mod rbac;

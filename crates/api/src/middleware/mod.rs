//! Request extractors and middleware.
//!
//! - [`auth::AuthUser`] -- Authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireAuth`] -- Requires `admin` or `editor`.
//! - [`origin::ClientOrigin`] -- Client address for audit entries.
//! - [`rbac::Actor`] -- Authenticated editor plus its audit identity.
//! - [`cache::read_through`] -- Response cache for public listings.

pub mod auth;
pub mod cache;
pub mod origin;
pub mod rbac;

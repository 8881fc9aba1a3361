//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint in the initial migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";

/// Every role a user account may hold.
pub const ALL_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR];

/// Whether `role` is one of [`ALL_ROLES`].
pub fn is_known_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}

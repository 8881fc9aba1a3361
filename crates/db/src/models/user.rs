//! Admin panel accounts.
//!
//! [`User`] never carries the password hash; login reads
//! [`UserCredentials`] separately.

use itam_core::error::CoreError;
use itam_core::roles::is_known_role;
use itam_core::types::{DbId, Timestamp};
use itam_core::validation::{check_email, reject_blank, require_text};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The columns needed to authenticate a login attempt.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: DbId,
    pub role: String,
    pub password_hash: String,
    pub is_active: bool,
}

/// Insert DTO. The password is hashed by the caller.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub role: String,
    pub password_hash: String,
}

fn check_role(role: &str) -> Result<(), CoreError> {
    if !is_known_role(role) {
        return Err(CoreError::Validation(format!("role '{role}' is not recognized")));
    }
    Ok(())
}

impl CreateUser {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("email", &self.email)?;
        check_email(&self.email)?;
        require_text("name", &self.name)?;
        check_role(&self.role)?;
        require_text("password", &self.password_hash)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub password_hash: Option<String>,
}

impl UpdateUser {
    pub fn validate(&self) -> Result<(), CoreError> {
        reject_blank("email", self.email.as_deref())?;
        if let Some(email) = &self.email {
            check_email(email)?;
        }
        reject_blank("name", self.name.as_deref())?;
        if let Some(role) = &self.role {
            check_role(role)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFilter {
    pub search: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

//! Repository for the `users` table.

use async_trait::async_trait;
use itam_core::audit::entity_types;
use itam_core::error::CoreError;
use itam_core::roles::ROLE_ADMIN;
use itam_core::types::DbId;
use sqlx::PgPool;

use crate::entity::Entity;
use crate::models::user::{CreateUser, UpdateUser, User, UserCredentials, UserFilter};
use crate::query::{FilterBuilder, Table, UpdateBuilder};

const COLUMNS: &str = "id, email, name, role, is_active, created_at, updated_at";

pub struct UserRepo;

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl Entity for UserRepo {
    type Record = User;
    type Create = CreateUser;
    type Update = UpdateUser;
    type Filter = UserFilter;

    const KIND: &'static str = entity_types::USER;
    const LABEL: &'static str = "User";
    const TABLE: Table = Table::simple("users", COLUMNS, "created_at DESC", "is_active = TRUE");
    const CACHE_KEYS: &'static [&'static str] = &[];
    const CONFLICT_MESSAGE: &'static str = "A user with this email already exists";

    fn validate_create(input: &CreateUser) -> Result<(), CoreError> {
        input.validate()
    }

    fn validate_update(input: &UpdateUser) -> Result<(), CoreError> {
        input.validate()
    }

    fn filter(filter: &UserFilter) -> FilterBuilder {
        FilterBuilder::new()
            .search(&["email", "name"], filter.search.as_deref())
            .eq("role", filter.role.clone())
            .eq("is_active", filter.is_active)
    }

    fn changes(_existing: &User, input: &UpdateUser) -> Result<UpdateBuilder, CoreError> {
        Ok(UpdateBuilder::new()
            .set("email", input.email.as_deref().map(normalize_email))
            .set_trimmed("name", input.name.as_deref())
            .set("role", input.role.clone())
            .set("is_active", input.is_active)
            .set("password_hash", input.password_hash.clone()))
    }

    async fn insert(pool: &PgPool, input: &CreateUser) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO users (email, name, role, password_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(normalize_email(&input.email))
        .bind(input.name.trim())
        .bind(&input.role)
        .bind(&input.password_hash)
        .fetch_one(pool)
        .await
    }
}

impl UserRepo {
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(normalize_email(email))
            .fetch_optional(pool)
            .await
    }

    pub async fn find_credentials_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        sqlx::query_as::<_, UserCredentials>(
            "SELECT id, role, password_hash, is_active FROM users WHERE email = $1",
        )
        .bind(normalize_email(email))
        .fetch_optional(pool)
        .await
    }

    /// Number of active users holding the admin role.
    pub async fn count_active_admins(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE role = $1 AND is_active = TRUE",
        )
        .bind(ROLE_ADMIN)
        .fetch_one(pool)
        .await
    }
}

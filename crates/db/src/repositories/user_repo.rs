//! Repository for the `users` table.
//!
//! All lookups exclude soft-deleted rows (`deleted_at IS NULL`); ordinary
//! flows never physically remove a user.

use edualert_core::email::SYSTEM_USER_EMAIL;
use edualert_core::roles::{ROLE_ADMIN, ROLE_SENIOR_OFFICER};
use edualert_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, Recipient, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, full_name, role, is_approved, \
                        is_verified, created_at, updated_at, deleted_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// New accounts start unverified and unapproved.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, full_name, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.full_name)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a non-deleted user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a non-deleted user by (normalized) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find the seeded system pseudo-user used for triage-authored comments.
    pub async fn find_system_user(pool: &PgPool) -> Result<Option<User>, sqlx::Error> {
        Self::find_by_email(pool, SYSTEM_USER_EMAIL).await
    }

    /// List all non-deleted users, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE deleted_at IS NULL ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Apply an admin update. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no non-deleted row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                full_name = COALESCE($2, full_name),
                role = COALESCE($3, role),
                is_approved = COALESCE($4, is_approved),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.role)
            .bind(input.is_approved)
            .fetch_optional(pool)
            .await
    }

    /// Mark a user approved. Returns the updated row, or `None` if absent.
    pub async fn approve(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET is_approved = TRUE, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a user's email address verified. Returns `true` if updated.
    pub async fn mark_verified(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET is_verified = TRUE, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Update a user's display name. Returns `true` if updated.
    pub async fn update_full_name(
        pool: &PgPool,
        id: DbId,
        full_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET full_name = $2, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(full_name)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Update a user's password hash. Returns `true` if updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete a user. Returns `true` if the row was updated.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All approved admins and senior officers, for unconditional triage
    /// fan-out. Excludes the system pseudo-user.
    pub async fn elevated_recipients(pool: &PgPool) -> Result<Vec<Recipient>, sqlx::Error> {
        sqlx::query_as::<_, Recipient>(
            "SELECT id, email, full_name FROM users
             WHERE role IN ($1, $2)
               AND is_approved
               AND deleted_at IS NULL
               AND email <> $3
             ORDER BY id",
        )
        .bind(ROLE_ADMIN)
        .bind(ROLE_SENIOR_OFFICER)
        .bind(SYSTEM_USER_EMAIL)
        .fetch_all(pool)
        .await
    }

    /// Look up recipient info for a set of user ids (for assignment emails).
    pub async fn recipients_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<Recipient>, sqlx::Error> {
        sqlx::query_as::<_, Recipient>(
            "SELECT id, email, full_name FROM users
             WHERE id = ANY($1) AND deleted_at IS NULL
             ORDER BY id",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }
}

//! Repository for the `account_tokens` table.

use edualert_core::types::DbId;
use sqlx::PgPool;

use crate::models::account_token::{AccountToken, CreateAccountToken};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, token_hash, purpose, expires_at, used_at, created_at";

/// Provides operations for verification / password-reset tokens.
pub struct AccountTokenRepo;

impl AccountTokenRepo {
    /// Persist a newly issued token (hash only).
    pub async fn create(
        pool: &PgPool,
        input: &CreateAccountToken,
    ) -> Result<AccountToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO account_tokens (user_id, token_hash, purpose, expires_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AccountToken>(&query)
            .bind(input.user_id)
            .bind(&input.token_hash)
            .bind(&input.purpose)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an unused, unexpired token by hash and purpose.
    pub async fn find_valid(
        pool: &PgPool,
        token_hash: &str,
        purpose: &str,
    ) -> Result<Option<AccountToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM account_tokens
             WHERE token_hash = $1 AND purpose = $2
               AND used_at IS NULL AND expires_at > NOW()"
        );
        sqlx::query_as::<_, AccountToken>(&query)
            .bind(token_hash)
            .bind(purpose)
            .fetch_optional(pool)
            .await
    }

    /// Mark a token consumed. Returns `true` if the row was updated.
    pub async fn mark_used(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE account_tokens SET used_at = NOW() WHERE id = $1 AND used_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Void any outstanding tokens of one purpose for a user, so only the
    /// most recently issued link works.
    pub async fn invalidate_for_user(
        pool: &PgPool,
        user_id: DbId,
        purpose: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE account_tokens SET used_at = NOW()
             WHERE user_id = $1 AND purpose = $2 AND used_at IS NULL",
        )
        .bind(user_id)
        .bind(purpose)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}

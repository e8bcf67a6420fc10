//! Email-verification / password-reset token model.

use edualert_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Account token row. `token_hash` is the SHA-256 hex digest of the
/// plaintext token that was emailed; the plaintext is never stored.
#[derive(Debug, Clone, FromRow)]
pub struct AccountToken {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub purpose: String,
    pub expires_at: Timestamp,
    pub used_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for issuing a new account token.
#[derive(Debug)]
pub struct CreateAccountToken {
    pub user_id: DbId,
    pub token_hash: String,
    pub purpose: String,
    pub expires_at: Timestamp,
}
